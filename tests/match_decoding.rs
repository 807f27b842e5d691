use cricket_stats::ingestion::{decode_match_from_path, decode_match_from_str};
use cricket_stats::processing::{matches, runs_per_over};
use cricket_stats::types::Season;
use cricket_stats::StatsError;

#[test]
fn decode_full_document_from_path() {
    let m = decode_match_from_path("tests/fixtures/odis/2019_india_pakistan.json").unwrap();

    assert_eq!(m.meta.revision, 2);
    assert_eq!(m.info.city, "Manchester");
    assert_eq!(m.info.venue, "Old Trafford, Manchester");
    assert_eq!(m.info.event.name, "ICC Cricket World Cup");
    assert_eq!(m.info.event.match_number, 22);
    assert_eq!(m.info.outcome.winner, "India");
    assert_eq!(m.info.outcome.by.runs, 89);
    assert_eq!(m.info.outcome.by.wickets, 0);
    assert_eq!(m.info.toss.winner, "Pakistan");
    assert_eq!(m.info.officials.umpires, vec!["M Erasmus", "MA Gough"]);
    assert_eq!(m.info.player_of_match, vec!["RG Sharma"]);
    assert_eq!(m.info.players["Pakistan"].len(), 3);
    assert_eq!(m.info.registry.people["RG Sharma"], "740742ef");
    assert_eq!(m.info.season, Season::Number(2019));
    assert_eq!(m.innings.len(), 2);
    assert_eq!(m.innings[1].overs[1].deliveries[0].extras.wides, 1);
    assert_eq!(m.delivery_count(), 11);
}

#[test]
fn season_shape_varies_between_documents() {
    let a = decode_match_from_path("tests/fixtures/odis/2019_india_pakistan.json").unwrap();
    let b = decode_match_from_path("tests/fixtures/odis/2015_australia_england.json").unwrap();
    assert_eq!(a.info.season, Season::Number(2019));
    assert_eq!(b.info.season, Season::Text("2014/15".to_string()));
}

#[test]
fn missing_city_is_empty_not_an_error() {
    let m = decode_match_from_path("tests/fixtures/no_city.json").unwrap();
    assert_eq!(m.info.city, "");
    assert_eq!(m.info.venue, "R Premadasa Stadium");
    assert!(m.innings.is_empty());
}

#[test]
fn truncated_document_is_a_decode_error() {
    let err = decode_match_from_path("tests/fixtures/odis/2017_truncated.json").unwrap_err();
    assert!(matches!(err, StatsError::Decode(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = decode_match_from_path("tests/fixtures/does_not_exist.json").unwrap_err();
    assert!(matches!(err, StatsError::Io(_)));
}

#[test]
fn runs_per_over_merges_innings_of_fixture() {
    let m = decode_match_from_path("tests/fixtures/odis/2019_india_pakistan.json").unwrap();
    let out = runs_per_over(&m);
    assert_eq!(out.iter().collect::<Vec<_>>(), vec![(0, 11), (1, 9)]);
    assert_eq!(out.total(), 20);
}

#[test]
fn india_pakistan_filter_requires_both() {
    let ip = decode_match_from_path("tests/fixtures/odis/2019_india_pakistan.json").unwrap();
    let sl = decode_match_from_path("tests/fixtures/no_city.json").unwrap();
    let filter = ["India", "Pakistan"];
    assert!(matches(&ip, &filter, None));
    assert!(!matches(&sl, &filter, None));
    assert!(matches(&sl, &["India"], Some("")));
}

#[test]
fn single_innings_two_overs_sum_separately() {
    let m = decode_match_from_str(
        r#"{"innings":[{"team":"India","overs":[
            {"over":1,"deliveries":[{"runs":{"total":1}},{"runs":{"total":4}},{"runs":{"total":0}},{"runs":{"total":2}}]},
            {"over":2,"deliveries":[{"runs":{"total":6}},{"runs":{"total":1}}]}]}]}"#,
    )
    .unwrap();
    let out = runs_per_over(&m);
    assert_eq!(out.get(1), 7);
    assert_eq!(out.get(2), 7);
    assert_eq!(out.len(), 2);
}
