//! Core data model for decoded match documents.
//!
//! A [`MatchRecord`] is built fresh from one JSON document by
//! [`crate::ingestion::decode_match_from_str`] (or one of its siblings) and is read-only
//! afterwards. Every field has a zero value, which is what the decoder produces when the source
//! document omits it.

use std::collections::BTreeMap;
use std::fmt;

/// One completed match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecord {
    /// Document metadata.
    pub meta: Meta,
    /// Match-level information (teams, venue, outcome, ...).
    pub info: MatchInfo,
    /// Innings in document order.
    pub innings: Vec<Innings>,
}

impl MatchRecord {
    /// Returns `true` if `team` appears in the team list (exact, case-sensitive).
    pub fn has_team(&self, team: &str) -> bool {
        self.info.teams.iter().any(|t| t == team)
    }

    /// Total number of deliveries across all innings.
    pub fn delivery_count(&self) -> usize {
        self.innings
            .iter()
            .flat_map(|i| &i.overs)
            .map(|o| o.deliveries.len())
            .sum()
    }
}

/// Informational metadata; not used by filtering or aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    pub data_version: String,
    pub created: String,
    pub revision: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchInfo {
    pub balls_per_over: i64,
    pub city: String,
    pub dates: Vec<String>,
    pub event: Event,
    pub gender: String,
    pub match_type: String,
    pub match_type_number: i64,
    pub officials: Officials,
    pub outcome: Outcome,
    /// Overs-per-innings limit.
    pub overs: i64,
    pub player_of_match: Vec<String>,
    /// Squad lists keyed by team name.
    pub players: BTreeMap<String, Vec<String>>,
    pub registry: Registry,
    pub season: Season,
    pub team_type: String,
    pub teams: Vec<String>,
    pub toss: Toss,
    pub venue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub match_number: i64,
}

/// Officials grouped by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Officials {
    pub match_referees: Vec<String>,
    pub reserve_umpires: Vec<String>,
    pub tv_umpires: Vec<String>,
    pub umpires: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Empty for ties and abandoned matches.
    pub winner: String,
    pub by: Margin,
    /// Set instead of `winner` for "tie", "draw" or "no result".
    pub result: String,
}

/// Winning margin. Only one of the two is normally non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margin {
    pub wickets: i64,
    pub runs: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toss {
    pub winner: String,
    pub decision: String,
}

/// Person registry: display name to stable identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    pub people: BTreeMap<String, String>,
}

/// The `season` field, whose JSON shape varies between documents
/// (`2019` in one file, `"2014/15"` in another).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Season {
    /// Field not present (or `null`).
    #[default]
    Absent,
    /// Integral JSON number.
    Number(i64),
    /// JSON string.
    Text(String),
    /// Any other shape, kept verbatim.
    Other(serde_json::Value),
}

impl Season {
    pub fn is_absent(&self) -> bool {
        matches!(self, Season::Absent)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Absent => Ok(()),
            Season::Number(n) => write!(f, "{n}"),
            Season::Text(s) => f.write_str(s),
            Season::Other(v) => write!(f, "{v}"),
        }
    }
}

/// One team's batting turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Innings {
    /// Batting team.
    pub team: String,
    pub overs: Vec<Over>,
    pub powerplays: Vec<Powerplay>,
}

/// A designated over range, e.g. `from: 0.1, to: 9.6`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Powerplay {
    pub from: f64,
    pub to: f64,
    /// JSON `type` (e.g. "mandatory").
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Over {
    /// Declared over number. Unique within an innings only.
    pub over: i64,
    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    pub batter: String,
    pub bowler: String,
    pub non_striker: String,
    pub extras: Extras,
    pub runs: Runs,
    pub wickets: Vec<Wicket>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extras {
    pub wides: i64,
    pub noballs: i64,
    pub byes: i64,
    pub legbyes: i64,
    pub penalty: i64,
}

/// Runs breakdown for one delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Runs {
    /// Off the bat.
    pub batter: i64,
    pub extras: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wicket {
    pub player_out: String,
    pub kind: String,
}
