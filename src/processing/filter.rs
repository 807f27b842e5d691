//! Team / event filtering of [`crate::types::MatchRecord`]s.

use crate::types::MatchRecord;

/// Returns `true` if `record` satisfies both filter conditions.
///
/// - Team condition: the number of `team_filter` entries found in `record.info.teams` equals
///   `team_filter.len()`. Matching is exact and case-sensitive; each entry is counted on its
///   own, so a repeated entry is satisfied by a single occurrence in the team list.
/// - Event condition: `event_name_filter` is `None` or empty, or equals
///   `record.info.event.name` exactly.
///
/// Empty filters accept every record.
pub fn matches<S: AsRef<str>>(record: &MatchRecord, team_filter: &[S], event_name_filter: Option<&str>) -> bool {
    let teams_found = team_filter
        .iter()
        .filter(|team| record.has_team(team.as_ref()))
        .count();

    let event_ok = match event_name_filter {
        None | Some("") => true,
        Some(name) => record.info.event.name == name,
    };

    teams_found == team_filter.len() && event_ok
}

/// Owned filter values, as carried by [`crate::config::PipelineConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    /// Teams that must all take part.
    pub teams: Vec<String>,
    /// Exact event name; `None` accepts any event.
    pub event_name: Option<String>,
}

impl MatchFilter {
    pub fn new<I, S>(teams: I, event_name: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            teams: teams.into_iter().map(Into::into).collect(),
            event_name,
        }
    }

    /// Evaluate the predicate against `record`. See [`matches`].
    pub fn accepts(&self, record: &MatchRecord) -> bool {
        matches(record, self.teams.as_slice(), self.event_name.as_deref())
    }
}

/// Returns the records accepted by `filter`, preserving input order.
pub fn filter_matches<'a>(records: &'a [MatchRecord], filter: &MatchFilter) -> Vec<&'a MatchRecord> {
    records.iter().filter(|r| filter.accepts(r)).collect()
}
