//! Match document decoding.
//!
//! Decoding is a best-effort structural projection of a JSON document onto [`MatchRecord`]:
//!
//! - the document must be syntactically valid JSON whose root is an object;
//! - unknown fields are ignored;
//! - missing fields, `null`, and fields of an unexpected JSON type project to the zero value
//!   (`""`, `0`, empty list/map) instead of failing the record;
//! - object keys are matched exactly first, then ASCII case-insensitively.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{StatsError, StatsResult};
use crate::types::{
    Delivery, Event, Extras, Innings, Margin, MatchInfo, MatchRecord, Meta, Officials, Outcome, Over,
    Powerplay, Registry, Runs, Season, Toss, Wicket,
};

/// Decode one match document from a file.
///
/// The file handle lives only for the duration of this call.
pub fn decode_match_from_path(path: impl AsRef<Path>) -> StatsResult<MatchRecord> {
    let file = File::open(path)?;
    decode_match_from_reader(BufReader::new(file))
}

/// Decode one match document from a reader.
///
/// Read failures surface as [`StatsError::Io`], malformed JSON as [`StatsError::Decode`].
pub fn decode_match_from_reader<R: Read>(reader: R) -> StatsResult<MatchRecord> {
    let root: Value = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            StatsError::Io(e.into())
        } else {
            StatsError::Decode(e)
        }
    })?;
    decode_match_value(&root)
}

/// Decode one match document from an in-memory string.
pub fn decode_match_from_str(input: &str) -> StatsResult<MatchRecord> {
    let root: Value = serde_json::from_str(input)?;
    decode_match_value(&root)
}

/// Project an already-parsed JSON value onto a [`MatchRecord`].
pub fn decode_match_value(root: &Value) -> StatsResult<MatchRecord> {
    if !root.is_object() {
        return Err(StatsError::SchemaMismatch {
            message: format!("match document must be a json object, found {}", kind_of(root)),
        });
    }

    let doc = Node::new(root);
    Ok(MatchRecord {
        meta: decode_meta(doc.get("meta")),
        info: decode_info(doc.get("info")),
        innings: doc.get("innings").items().map(decode_innings).collect(),
    })
}

fn decode_meta(meta: Node<'_>) -> Meta {
    Meta {
        data_version: meta.get("data_version").string(),
        created: meta.get("created").string(),
        revision: meta.get("revision").int(),
    }
}

fn decode_info(info: Node<'_>) -> MatchInfo {
    MatchInfo {
        balls_per_over: info.get("balls_per_over").int(),
        city: info.get("city").string(),
        dates: info.get("dates").strings(),
        event: Event {
            name: info.path("event.name").string(),
            match_number: info.path("event.match_number").int(),
        },
        gender: info.get("gender").string(),
        match_type: info.get("match_type").string(),
        match_type_number: info.get("match_type_number").int(),
        officials: decode_officials(info.get("officials")),
        outcome: Outcome {
            winner: info.path("outcome.winner").string(),
            by: Margin {
                wickets: info.path("outcome.by.wickets").int(),
                runs: info.path("outcome.by.runs").int(),
            },
            result: info.path("outcome.result").string(),
        },
        overs: info.get("overs").int(),
        player_of_match: info.get("player_of_match").strings(),
        players: info
            .get("players")
            .entries()
            .map(|(team, squad)| (team.to_string(), squad.strings()))
            .collect(),
        registry: Registry {
            people: info.path("registry.people").string_map(),
        },
        season: decode_season(info.get("season")),
        team_type: info.get("team_type").string(),
        teams: info.get("teams").strings(),
        toss: Toss {
            winner: info.path("toss.winner").string(),
            decision: info.path("toss.decision").string(),
        },
        venue: info.get("venue").string(),
    }
}

fn decode_officials(officials: Node<'_>) -> Officials {
    Officials {
        match_referees: officials.get("match_referees").strings(),
        reserve_umpires: officials.get("reserve_umpires").strings(),
        tv_umpires: officials.get("tv_umpires").strings(),
        umpires: officials.get("umpires").strings(),
    }
}

fn decode_season(season: Node<'_>) -> Season {
    match season.value() {
        None | Some(Value::Null) => Season::Absent,
        Some(Value::String(s)) => Season::Text(s.clone()),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Season::Number(i),
            None => Season::Other(Value::Number(n.clone())),
        },
        Some(other) => Season::Other(other.clone()),
    }
}

fn decode_innings(innings: Node<'_>) -> Innings {
    Innings {
        team: innings.get("team").string(),
        overs: innings.get("overs").items().map(decode_over).collect(),
        powerplays: innings
            .get("powerplays")
            .items()
            .map(|pp| Powerplay {
                from: pp.get("from").float(),
                to: pp.get("to").float(),
                kind: pp.get("type").string(),
            })
            .collect(),
    }
}

fn decode_over(over: Node<'_>) -> Over {
    Over {
        over: over.get("over").int(),
        deliveries: over.get("deliveries").items().map(decode_delivery).collect(),
    }
}

fn decode_delivery(delivery: Node<'_>) -> Delivery {
    let extras = delivery.get("extras");
    let runs = delivery.get("runs");
    Delivery {
        batter: delivery.get("batter").string(),
        bowler: delivery.get("bowler").string(),
        non_striker: delivery.get("non_striker").string(),
        extras: Extras {
            wides: extras.get("wides").int(),
            noballs: extras.get("noballs").int(),
            byes: extras.get("byes").int(),
            legbyes: extras.get("legbyes").int(),
            penalty: extras.get("penalty").int(),
        },
        runs: Runs {
            batter: runs.get("batter").int(),
            extras: runs.get("extras").int(),
            total: runs.get("total").int(),
        },
        wickets: delivery
            .get("wickets")
            .items()
            .map(|w| Wicket {
                player_out: w.get("player_out").string(),
                kind: w.get("kind").string(),
            })
            .collect(),
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A possibly-missing position inside a JSON document.
///
/// Every accessor is total: a missing node or a node of the wrong type yields the zero value.
#[derive(Clone, Copy)]
struct Node<'a>(Option<&'a Value>);

impl<'a> Node<'a> {
    fn new(v: &'a Value) -> Self {
        Node(Some(v))
    }

    fn value(self) -> Option<&'a Value> {
        self.0
    }

    fn object(self) -> Option<&'a Map<String, Value>> {
        self.0.and_then(Value::as_object)
    }

    fn get(self, key: &str) -> Node<'a> {
        Node(self.object().and_then(|map| lookup(map, key)))
    }

    /// Nested lookup using dot notation, e.g. `outcome.by.wickets`.
    fn path(self, dotted: &str) -> Node<'a> {
        dotted.split('.').fold(self, |node, segment| node.get(segment))
    }

    fn string(self) -> String {
        self.0
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default()
    }

    fn int(self) -> i64 {
        match self.0 {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
                .unwrap_or(0),
            _ => 0,
        }
    }

    fn float(self) -> f64 {
        self.0.and_then(Value::as_f64).unwrap_or(0.0)
    }

    fn items(self) -> impl Iterator<Item = Node<'a>> {
        self.0
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(Node::new)
    }

    fn entries(self) -> impl Iterator<Item = (&'a str, Node<'a>)> {
        self.object()
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), Node::new(v)))
    }

    /// String elements of an array; non-string elements are dropped.
    fn strings(self) -> Vec<String> {
        self.items()
            .filter_map(|n| n.0.and_then(Value::as_str).map(str::to_owned))
            .collect()
    }

    /// String-valued members of an object; other members are dropped.
    fn string_map(self) -> BTreeMap<String, String> {
        self.entries()
            .filter_map(|(k, v)| v.0.and_then(Value::as_str).map(|s| (k.to_owned(), s.to_owned())))
            .collect()
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use super::{decode_match_from_reader, decode_match_from_str};
    use crate::error::StatsError;
    use crate::ingestion::Severity;
    use crate::types::Season;

    #[test]
    fn missing_city_decodes_to_empty_string() {
        let record = decode_match_from_str(r#"{"info":{"venue":"Eden Gardens"}}"#).unwrap();
        assert_eq!(record.info.city, "");
        assert_eq!(record.info.venue, "Eden Gardens");
    }

    #[test]
    fn empty_object_decodes_to_zero_values() {
        let record = decode_match_from_str("{}").unwrap();
        assert!(record.info.teams.is_empty());
        assert!(record.innings.is_empty());
        assert_eq!(record.meta.revision, 0);
        assert!(record.info.season.is_absent());
    }

    #[test]
    fn season_accepts_number_string_and_other_shapes() {
        let n = decode_match_from_str(r#"{"info":{"season":2019}}"#).unwrap();
        let s = decode_match_from_str(r#"{"info":{"season":"2014/15"}}"#).unwrap();
        let f = decode_match_from_str(r#"{"info":{"season":2019.5}}"#).unwrap();
        let a = decode_match_from_str(r#"{"info":{"season":[2019,2020]}}"#).unwrap();
        assert_eq!(n.info.season, Season::Number(2019));
        assert_eq!(s.info.season, Season::Text("2014/15".to_string()));
        assert!(matches!(f.info.season, Season::Other(_)));
        assert!(matches!(a.info.season, Season::Other(_)));
    }

    #[test]
    fn wrong_types_and_nulls_project_to_zero_values() {
        let input = r#"{
            "meta": {"revision": "three"},
            "info": {"city": 42, "teams": ["India", 7, null, "Pakistan"], "overs": null,
                     "event": "not an object"}
        }"#;
        let record = decode_match_from_str(input).unwrap();
        assert_eq!(record.meta.revision, 0);
        assert_eq!(record.info.city, "");
        assert_eq!(record.info.teams, vec!["India", "Pakistan"]);
        assert_eq!(record.info.overs, 0);
        assert_eq!(record.info.event.name, "");
    }

    #[test]
    fn keys_fall_back_to_case_insensitive_match() {
        let record = decode_match_from_str(r#"{"Info":{"Teams":["India","Pakistan"]}}"#).unwrap();
        assert_eq!(record.info.teams, vec!["India", "Pakistan"]);
    }

    #[test]
    fn decodes_innings_hierarchy() {
        let input = r#"{"innings":[{"team":"India","overs":[{"over":0,"deliveries":[
            {"batter":"RG Sharma","bowler":"Mohammad Amir","non_striker":"KL Rahul",
             "extras":{"wides":1},"runs":{"batter":0,"extras":1,"total":1}},
            {"batter":"RG Sharma","bowler":"Mohammad Amir","non_striker":"KL Rahul",
             "runs":{"batter":0,"extras":0,"total":0},
             "wickets":[{"player_out":"RG Sharma","kind":"caught"}]}
        ]}],"powerplays":[{"from":0.1,"to":9.6,"type":"mandatory"}]}]}"#;
        let record = decode_match_from_str(input).unwrap();
        let innings = &record.innings[0];
        assert_eq!(innings.team, "India");
        assert_eq!(innings.powerplays[0].kind, "mandatory");
        assert_eq!(innings.powerplays[0].to, 9.6);
        let balls = &innings.overs[0].deliveries;
        assert_eq!(balls[0].extras.wides, 1);
        assert_eq!(balls[0].runs.total, 1);
        assert_eq!(balls[1].wickets[0].kind, "caught");
        assert_eq!(balls[1].extras.wides, 0);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_match_from_str(r#"{"info": {"teams": ["India""#).unwrap_err();
        assert!(matches!(err, StatsError::Decode(_)));
        assert!(err.to_string().contains("decode error"));
    }

    #[test]
    fn non_object_root_is_a_schema_mismatch() {
        let err = decode_match_from_str("[1, 2, 3]").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("schema mismatch"));
        assert!(msg.contains("an array"));
    }

    #[test]
    fn non_integral_numbers_project_to_zero_for_integer_fields() {
        let input = r#"{"meta":{"revision":2.5},"info":{"overs":49.3,"balls_per_over":6},
            "innings":[{"overs":[{"over":1.5,"deliveries":[{"runs":{"batter":4,"total":4.0}}]}]}]}"#;
        let record = decode_match_from_str(input).unwrap();
        assert_eq!(record.meta.revision, 0);
        assert_eq!(record.info.overs, 0);
        assert_eq!(record.info.balls_per_over, 6);
        let over = &record.innings[0].overs[0];
        assert_eq!(over.over, 0);
        assert_eq!(over.deliveries[0].runs.batter, 4);
        assert_eq!(over.deliveries[0].runs.total, 0);
    }

    /// Hands out `data`, then fails every further read.
    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "share went away"));
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn read_failure_midway_is_an_io_error() {
        let reader = FailingReader {
            data: br#"{"info":{"teams":["India","#,
        };
        let err = decode_match_from_reader(reader).unwrap_err();
        assert!(matches!(&err, StatsError::Io(e) if e.kind() == io::ErrorKind::ConnectionReset));
        assert_eq!(Severity::for_error(&err), Severity::Critical);
    }

    #[test]
    fn reader_decoding_matches_str_decoding() {
        let input = r#"{"info":{"city":"Manchester","teams":["India","Pakistan"]}}"#;
        let from_reader = decode_match_from_reader(input.as_bytes()).unwrap();
        assert_eq!(from_reader, decode_match_from_str(input).unwrap());
    }
}
