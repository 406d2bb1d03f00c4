// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{
    CriteriaIssue, DataKind, DomainError, MetricDefinition, NumericRange, ParsedCriteria,
    RangeBound, ValidationCriteria,
};

#[test]
fn test_data_kind_parses_storage_strings() {
    assert_eq!(DataKind::from_str("number").unwrap(), DataKind::Number);
    assert_eq!(
        DataKind::from_str("single_option").unwrap(),
        DataKind::SingleOption
    );
    assert_eq!(
        DataKind::from_str(" Multiple_Option ").unwrap(),
        DataKind::MultipleOption
    );
    assert_eq!(DataKind::Percentage.as_str(), "percentage");
}

#[test]
fn test_unknown_data_kind_is_rejected() {
    assert_eq!(
        DataKind::from_str("currency"),
        Err(DomainError::UnknownDataKind(String::from("currency")))
    );
}

#[test]
fn test_range_clauses_keep_configured_order() {
    let forward: ParsedCriteria = ValidationCriteria::parse(DataKind::Decimal, Some("min:1,max:5"));
    let reverse: ParsedCriteria =
        ValidationCriteria::parse(DataKind::Decimal, Some(" max:5 , min:1 "));

    assert_eq!(
        forward.criteria,
        ValidationCriteria::Range(NumericRange::new(vec![
            RangeBound::Min(Decimal::from(1)),
            RangeBound::Max(Decimal::from(5)),
        ]))
    );
    assert_eq!(
        reverse.criteria,
        ValidationCriteria::Range(NumericRange::new(vec![
            RangeBound::Max(Decimal::from(5)),
            RangeBound::Min(Decimal::from(1)),
        ]))
    );
    assert!(forward.issues.is_empty());
    assert!(reverse.issues.is_empty());
}

#[test]
fn test_single_sided_range() {
    let parsed: ParsedCriteria = ValidationCriteria::parse(DataKind::Number, Some("min:0"));
    assert_eq!(
        parsed.criteria,
        ValidationCriteria::Range(NumericRange::new(vec![RangeBound::Min(Decimal::ZERO)]))
    );
}

#[test]
fn test_blank_criteria_parse_to_none() {
    for raw in [None, Some(""), Some("   ")] {
        let parsed: ParsedCriteria = ValidationCriteria::parse(DataKind::Number, raw);
        assert_eq!(parsed.criteria, ValidationCriteria::None);
        assert!(parsed.issues.is_empty());
    }
}

#[test]
fn test_invalid_bound_is_reported_and_skipped() {
    let parsed: ParsedCriteria =
        ValidationCriteria::parse(DataKind::Number, Some("min:ten,max:20"));
    assert_eq!(
        parsed.criteria,
        ValidationCriteria::Range(NumericRange::new(vec![RangeBound::Max(Decimal::from(20))]))
    );
    assert_eq!(
        parsed.issues,
        vec![CriteriaIssue::InvalidBound {
            clause: String::from("min:ten")
        }]
    );
}

#[test]
fn test_exponent_bound_is_flagged() {
    let parsed: ParsedCriteria = ValidationCriteria::parse(DataKind::Decimal, Some("max:1e3"));
    assert_eq!(parsed.criteria, ValidationCriteria::None);
    assert_eq!(
        parsed.issues,
        vec![CriteriaIssue::InvalidBound {
            clause: String::from("max:1e3")
        }]
    );
}

#[test]
fn test_option_text_on_numeric_kind_is_flagged() {
    let parsed: ParsedCriteria = ValidationCriteria::parse(DataKind::Number, Some("Red,Green"));
    assert_eq!(parsed.criteria, ValidationCriteria::None);
    assert_eq!(parsed.issues.len(), 2);
    assert!(matches!(
        parsed.issues[0],
        CriteriaIssue::UnrecognisedClause { .. }
    ));
}

#[test]
fn test_inverted_range_is_flagged() {
    let parsed: ParsedCriteria = ValidationCriteria::parse(DataKind::Number, Some("min:10,max:1"));
    assert_eq!(
        parsed.issues,
        vec![CriteriaIssue::EmptyRange {
            min: Decimal::from(10),
            max: Decimal::from(1),
        }]
    );
}

#[test]
fn test_repeated_bound_is_kept_and_flagged() {
    let parsed: ParsedCriteria = ValidationCriteria::parse(DataKind::Number, Some("max:5,max:8"));
    let ValidationCriteria::Range(range) = &parsed.criteria else {
        panic!("expected a range, got {:?}", parsed.criteria);
    };
    assert_eq!(range.bounds().len(), 2);
    assert_eq!(range.max(), Some(Decimal::from(5)));
    assert_eq!(range.min(), None);
    assert_eq!(
        parsed.issues,
        vec![CriteriaIssue::DuplicateBound {
            clause: String::from("max:8")
        }]
    );
}

#[test]
fn test_options_are_trimmed_and_empty_entries_dropped() {
    let parsed: ParsedCriteria =
        ValidationCriteria::parse(DataKind::SingleOption, Some(" Red , ,Amber,Green,"));
    assert_eq!(
        parsed.criteria,
        ValidationCriteria::Options(vec![
            String::from("Red"),
            String::from("Amber"),
            String::from("Green"),
        ])
    );
    assert!(parsed.issues.is_empty());
}

#[test]
fn test_range_text_on_option_kind_is_flagged() {
    let parsed: ParsedCriteria =
        ValidationCriteria::parse(DataKind::MultipleOption, Some("min:0,max:10"));
    assert_eq!(parsed.issues.len(), 2);
    assert!(
        parsed
            .issues
            .iter()
            .all(|issue| matches!(issue, CriteriaIssue::RangeClauseInOptions { .. }))
    );
}

#[test]
fn test_option_kind_without_options_is_flagged() {
    let parsed: ParsedCriteria = ValidationCriteria::parse(DataKind::SingleOption, None);
    assert_eq!(parsed.criteria, ValidationCriteria::None);
    assert_eq!(parsed.issues, vec![CriteriaIssue::MissingOptions]);
}

#[test]
fn test_criteria_on_text_kind_are_ignored() {
    let parsed: ParsedCriteria = ValidationCriteria::parse(DataKind::Text, Some("min:1"));
    assert_eq!(parsed.criteria, ValidationCriteria::None);
    assert_eq!(
        parsed.issues,
        vec![CriteriaIssue::Ignored {
            kind: DataKind::Text
        }]
    );
}

#[test]
fn test_definition_keeps_raw_text_alongside_parsed_criteria() {
    let metric: MetricDefinition = MetricDefinition::new("PM-002", "RAG", DataKind::SingleOption)
        .with_criteria(Some("  Red,Amber,Green "));

    assert_eq!(metric.raw_criteria(), Some("Red,Amber,Green"));
    assert!(matches!(metric.criteria(), ValidationCriteria::Options(options) if options.len() == 3));
    assert!(metric.criteria_issues().is_empty());
    assert!(metric.enabled);
    assert!(!metric.mandatory);
}
