// src/tests/eventkind_tests.rs

//! tests for `eventkind.rs`

#![allow(non_snake_case)]

use crate::common::{ParserConfig, ResultMatch, CGN_DATETIME, DATETIME_FORMAT_DEFAULT, LOG_PREFIX_DEFAULT};
use crate::data::datetime::DateTimePrecision;
use crate::data::event::CsvRow;
use crate::data::eventkind::{
    regex_pattern_full,
    ConfigError,
    EventKind,
    EventKindId,
    EventKindRegistry,
    EVENT_KIND_COUNT,
    EVENT_KIND_DEFS,
};
use crate::readers::linematcher::LineMatcher;
use crate::tests::common::{registry_test, LINES_NOISE};

use std::collections::HashSet;

use ::more_asserts::{assert_ge, assert_gt};
use ::test_case::test_case;

/// a crude way to help the developer not forget about updating the
/// hardcoded test cases of `test_EVENT_KIND_DEFS_test_cases`
#[test]
fn test_EVENT_KIND_DEFS_has_all_test_cases() {
    assert_eq!(
        // IF YOU CHANGE THIS NUMBER THEN ALSO UPDATE THE TEST CASES
        // FOR `test_EVENT_KIND_DEFS_test_cases` BELOW!
        12,
        EVENT_KIND_DEFS.len(),
        "Did you update?\n\n    #[test_case({0})]\n    fn test_EVENT_KIND_DEFS_test_cases()\n\n",
        EVENT_KIND_COUNT
    );
}

#[test]
fn test_EVENT_KIND_DEFS_unique() {
    let names: HashSet<&str> = EVENT_KIND_DEFS.iter().map(|ekd| ekd.name).collect();
    assert_eq!(names.len(), EVENT_KIND_COUNT, "duplicate name");
    let file_names: HashSet<&str> = EVENT_KIND_DEFS.iter().map(|ekd| ekd.file_name).collect();
    assert_eq!(file_names.len(), EVENT_KIND_COUNT, "duplicate file_name");
    let ids: HashSet<EventKindId> = EVENT_KIND_DEFS.iter().map(|ekd| ekd.id).collect();
    assert_eq!(ids.len(), EVENT_KIND_COUNT, "duplicate id");
}

#[test]
fn test_EVENT_KIND_DEFS_order_matches_id() {
    let mut ids: Vec<EventKindId> = EVENT_KIND_DEFS.iter().map(|ekd| ekd.id).collect();
    let ids_declared = ids.clone();
    ids.sort();
    assert_eq!(ids, ids_declared);
}

/// match the built-in test cases for all entries in `EVENT_KIND_DEFS`,
/// and check no other kind matches them
#[test_case(0)]
#[test_case(1)]
#[test_case(2)]
#[test_case(3)]
#[test_case(4)]
#[test_case(5)]
#[test_case(6)]
#[test_case(7)]
#[test_case(8)]
#[test_case(9)]
#[test_case(10)]
#[test_case(11)]
fn test_EVENT_KIND_DEFS_test_cases(index: usize) {
    let ekd = &EVENT_KIND_DEFS[index];
    eprintln!("Testing ekd {} declared at line {} …", ekd.name, ekd._line_num);

    assert_gt!(ekd._test_cases.len(), 0, "No test data for ekd declared at line {}", ekd._line_num);
    assert_ge!(ekd.columns.len(), 3, "too few columns; declared at line {}", ekd._line_num);
    assert_eq!(ekd.columns[0], "timestamp", "first column must be timestamp; declared at line {}", ekd._line_num);
    assert!(ekd.file_name.ends_with(".csv"), "declared at line {}", ekd._line_num);

    let registry = registry_test();
    for (line_num, line) in ekd._test_cases.iter().enumerate() {
        let line_num = line_num as u64 + 1;
        for kind in registry.iter() {
            let matcher = LineMatcher::new(kind, DATETIME_FORMAT_DEFAULT);
            let result = matcher.match_line(line, line_num);
            if kind.id() != ekd.id {
                assert!(
                    result.is_nomatch(),
                    "kind {} also matched test case of {} declared at line {}\n  {:?}",
                    kind,
                    ekd.name,
                    ekd._line_num,
                    line
                );
                continue;
            }
            let record = match result {
                ResultMatch::Found(val) => val,
                ResultMatch::NoMatch => {
                    panic!("No match for test case of {} declared at line {}\n  {:?}\n  regex {:?}",
                        ekd.name, ekd._line_num, line, kind.regex().as_str());
                }
                ResultMatch::Err(err) => {
                    panic!("Decode error for test case of {} declared at line {}\n  {}", ekd.name, ekd._line_num, err);
                }
            };
            assert_eq!(record.kind_id(), ekd.id);
            assert_eq!(
                record.csv_fields().len(),
                ekd.columns.len(),
                "field count is not column count; declared at line {}",
                ekd._line_num
            );
            assert_gt!(record.timestamp(), 1577836800.0);
        }
    }
}

#[test]
fn test_regex_pattern_full() {
    let ekd = &EVENT_KIND_DEFS[EventKindId::Tick as usize];
    let pattern = regex_pattern_full(LOG_PREFIX_DEFAULT, ekd).unwrap();
    assert!(pattern.starts_with("^LOG (?P<"), "{:?}", pattern);
    assert!(pattern.ends_with("s to finish$"), "{:?}", pattern);
    let datetime_group = format!("(?P<{}>{})", CGN_DATETIME, DateTimePrecision::Seconds.regex_pattern());
    assert!(pattern.contains(&datetime_group), "{:?}", pattern);
    assert!(!pattern.contains("{datetime}"), "{:?}", pattern);
}

#[test]
fn test_regex_pattern_full_missing_placeholder() {
    let ekd = &EVENT_KIND_DEFS[0];
    let result = regex_pattern_full(r"^LOG \[(?P<node>\S+)\] ", ekd);
    assert!(matches!(result, Err(ConfigError::MissingDatetimePlaceholder(_))), "{:?}", result);
}

#[test_case(r"^LOG \[(?P<node>\S+)\] "; "no datetime placeholder")]
fn test_EventKindRegistry_MissingDatetimePlaceholder(log_prefix: &str) {
    let config = ParserConfig {
        log_prefix: String::from(log_prefix),
        ..Default::default()
    };
    let result = EventKindRegistry::new(&config);
    assert!(matches!(result, Err(ConfigError::MissingDatetimePlaceholder(_))), "{:?}", result);
}

#[test_case(r"^LOG {datetime} \[\S+\] "; "no group")]
#[test_case(r"^LOG {datetime} \[(?P<host>\S+)\] "; "wrong group name")]
fn test_EventKindRegistry_MissingNodeGroup(log_prefix: &str) {
    let config = ParserConfig {
        log_prefix: String::from(log_prefix),
        ..Default::default()
    };
    let result = EventKindRegistry::new(&config);
    assert!(matches!(result, Err(ConfigError::MissingNodeGroup(_))), "{:?}", result);
}

#[test_case(r"^LOG {datetime} \[(?P<node>\S+\] "; "unclosed group")]
#[test_case(r"^LOG {datetime} (?P<node>\S+) (?P<node>\S+) "; "duplicate group")]
fn test_EventKindRegistry_Regex(log_prefix: &str) {
    let config = ParserConfig {
        log_prefix: String::from(log_prefix),
        ..Default::default()
    };
    match EventKindRegistry::new(&config) {
        Err(ConfigError::Regex { kind, err: _ }) => assert_eq!(kind, EVENT_KIND_DEFS[0].name),
        result => panic!("expected ConfigError::Regex, got {:?}", result),
    }
}

#[test]
fn test_EventKindRegistry_custom_prefix() {
    let config = ParserConfig {
        log_prefix: String::from(r"^{datetime} (?P<node>[a-z0-9\-]+): "),
        datetime_format: String::from("%Y-%m-%d %H:%M:%S%.f"),
        ..Default::default()
    };
    let registry = EventKindRegistry::new(&config).unwrap();
    let kind = registry.get(EventKindId::MempoolSnapshot).unwrap();
    let matcher = LineMatcher::new(kind, &config.datetime_format);
    let record = match matcher
        .match_line("2020-01-01 00:00:00.000001 node-7: Checking mempool with 4 transactions and 9 inputs", 1)
    {
        ResultMatch::Found(record) => record,
        result => panic!("expected Found, got {:?}", result),
    };
    assert_eq!(record.node(), Some("node-7"));
    let fields: Vec<String> = record.csv_fields().iter().map(|f| f.to_string()).collect();
    assert_eq!(fields[1..], ["node-7", "4", "9"]);
    // the default prefix no longer matches
    let result = matcher.match_line("LOG 2020-01-01 00:00:00 [node-7] Checking mempool with 4 transactions and 9 inputs", 2);
    assert!(result.is_nomatch());
}

#[test]
fn test_EventKindRegistry_new() {
    let registry = registry_test();
    assert_eq!(registry.len(), EVENT_KIND_COUNT);
    assert!(!registry.is_empty());
    let names: Vec<&str> = registry.iter().map(EventKind::name).collect();
    let names_expect: Vec<&str> = EVENT_KIND_DEFS.iter().map(|ekd| ekd.name).collect();
    assert_eq!(names, names_expect);
    for (kind, ekd) in (&registry).into_iter().zip(EVENT_KIND_DEFS.iter()) {
        assert_eq!(kind.id(), ekd.id);
        assert_eq!(kind.file_name(), ekd.file_name);
        assert_eq!(kind.columns(), ekd.columns);
        assert_eq!(kind.to_string(), ekd.name);
    }
}

#[test_case("Tick", Some(EventKindId::Tick))]
#[test_case("tick", Some(EventKindId::Tick); "lowercase")]
#[test_case("UPDATETIP", Some(EventKindId::UpdateTip); "uppercase")]
#[test_case("NoSuchKind", None)]
#[test_case("", None; "empty")]
fn test_EventKindRegistry_get_by_name(
    name: &str,
    expect: Option<EventKindId>,
) {
    let registry = registry_test();
    assert_eq!(registry.get_by_name(name).map(EventKind::id), expect);
}

#[test]
fn test_EventKindRegistry_select() {
    let names = vec![String::from("tick"), String::from("BlockCreate")];
    let registry = registry_test().select(&names).unwrap();
    assert_eq!(registry.len(), 2);
    // registry order is kept, not the order of `names`
    let ids: Vec<EventKindId> = registry.iter().map(EventKind::id).collect();
    assert_eq!(ids, vec![EventKindId::BlockCreate, EventKindId::Tick]);
}

#[test]
fn test_EventKindRegistry_select_unknown() {
    let names = vec![String::from("Tick"), String::from("Ticks")];
    let result = registry_test().select(&names);
    assert_eq!(result.err(), Some(String::from("Ticks")));
}

#[test]
fn test_EventKindRegistry_noise() {
    let registry = registry_test();
    for line in LINES_NOISE.iter() {
        for kind in registry.iter() {
            let matcher = LineMatcher::new(kind, DATETIME_FORMAT_DEFAULT);
            assert!(matcher.match_line(line, 1).is_nomatch(), "kind {} matched {:?}", kind, line);
        }
    }
}

#[test]
fn test_ConfigError_display() {
    let err = ConfigError::MissingNodeGroup(String::from("^x{datetime}"));
    let s = err.to_string();
    assert!(s.contains("node"), "{}", s);
    let err = ConfigError::MissingDatetimePlaceholder(String::from("^x"));
    assert!(err.to_string().contains("{datetime}"));
}
