// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;

use crate::{
    DataKind, DomainError, MetricDefinition, RejectionReason, ValueRejection,
    validate_metric_definition, validate_metric_value,
};

fn metric(name: &str, kind: DataKind, criteria: Option<&str>) -> MetricDefinition {
    let mut metric: MetricDefinition =
        MetricDefinition::new("PM-001", name, kind).with_criteria(criteria);
    metric.metric_id = Some(1);
    metric
}

fn rejection(metric: &MetricDefinition, value: &str) -> ValueRejection {
    validate_metric_value(metric, Some(value), false).unwrap_err()
}

#[test]
fn test_number_within_range_is_valid() {
    let uptime: MetricDefinition = metric("Uptime", DataKind::Number, Some("min:0,max:100"));
    assert!(validate_metric_value(&uptime, Some("42"), false).is_ok());
}

#[test]
fn test_number_above_max_reports_bound() {
    let uptime: MetricDefinition = metric("Uptime", DataKind::Number, Some("min:0,max:100"));
    let err: ValueRejection = rejection(&uptime, "150");

    assert_eq!(err.field, "value");
    assert_eq!(err.message, "'Uptime' must be no more than 100.");
    assert_eq!(
        err.reason,
        RejectionReason::AboveMaximum {
            max: Decimal::from(100)
        }
    );
}

#[test]
fn test_number_below_min_reports_bound() {
    let uptime: MetricDefinition = metric("Uptime", DataKind::Number, Some("max:100,min:10"));
    assert_eq!(rejection(&uptime, "5").message, "'Uptime' must be at least 10.");
}

#[test]
fn test_first_violated_bound_in_configured_order_wins() {
    let odd: MetricDefinition = metric("Odd", DataKind::Number, Some("max:5,min:10"));
    assert_eq!(rejection(&odd, "7").message, "'Odd' must be no more than 5.");
}

#[test]
fn test_repeated_bounds_are_all_enforced() {
    let floor: MetricDefinition = metric("Floor", DataKind::Number, Some("min:5,min:0"));
    assert_eq!(rejection(&floor, "3").message, "'Floor' must be at least 5.");
}

#[test]
fn test_range_bounds_are_inclusive() {
    let uptime: MetricDefinition = metric("Uptime", DataKind::Number, Some("min:0,max:100"));
    assert!(validate_metric_value(&uptime, Some("0"), false).is_ok());
    assert!(validate_metric_value(&uptime, Some("100"), false).is_ok());
}

#[test]
fn test_number_rejects_fraction() {
    let users: MetricDefinition = metric("Active users", DataKind::Number, None);
    let err: ValueRejection = rejection(&users, "12.5");
    assert_eq!(err.message, "'Active users' must be a whole number.");
    assert_eq!(err.reason, RejectionReason::NotWholeNumber);
}

#[test]
fn test_number_accepts_surrounding_whitespace() {
    let users: MetricDefinition = metric("Active users", DataKind::Number, None);
    assert!(validate_metric_value(&users, Some("  17 "), false).is_ok());
}

#[test]
fn test_decimal_rejects_text() {
    let spend: MetricDefinition = metric("Spend", DataKind::Decimal, None);
    assert_eq!(rejection(&spend, "lots").message, "'Spend' must be a decimal number.");
}

#[test]
fn test_decimal_rejects_exponent_and_separator_forms() {
    let cost: MetricDefinition = metric("Cost", DataKind::Decimal, Some("max:100"));
    for raw in ["1e3", "1E2", "1_000", "1,000", "12.", ".", "-", "0x10", "1.2.3"] {
        assert_eq!(
            rejection(&cost, raw).reason,
            RejectionReason::NotDecimal,
            "{raw}"
        );
    }
}

#[test]
fn test_decimal_accepts_plain_literals() {
    let cost: MetricDefinition = metric("Cost", DataKind::Decimal, Some("min:-10,max:100"));
    for raw in ["12", "-0.5", "+7.25", ".25", "100.0"] {
        assert!(validate_metric_value(&cost, Some(raw), false).is_ok(), "{raw}");
    }
}

#[test]
fn test_decimal_refuses_precision_it_would_round() {
    let cost: MetricDefinition = metric("Cost", DataKind::Decimal, Some("max:100"));
    assert_eq!(
        rejection(&cost, "100.00000000000000000000000000001").reason,
        RejectionReason::NotDecimal
    );
}

#[test]
fn test_percentage_rejects_exponent_form() {
    let share: MetricDefinition = metric("Share", DataKind::Percentage, Some("max:100"));
    assert_eq!(rejection(&share, "1e1").message, "'Share' must be a number.");
}

#[test]
fn test_decimal_range_uses_exact_comparison() {
    let spend: MetricDefinition = metric("Spend", DataKind::Decimal, Some("min:0.1,max:0.3"));
    assert!(validate_metric_value(&spend, Some("0.3"), false).is_ok());
    assert_eq!(
        rejection(&spend, "0.30001").message,
        "'Spend' must be no more than 0.3."
    );
}

#[test]
fn test_percentage_rejects_text_and_checks_range() {
    let satisfaction: MetricDefinition =
        metric("Satisfaction", DataKind::Percentage, Some("\"min:0,max:100\""));
    assert_eq!(
        rejection(&satisfaction, "high").message,
        "'Satisfaction' must be a number."
    );
    assert_eq!(
        rejection(&satisfaction, "100.5").message,
        "'Satisfaction' must be no more than 100."
    );
    assert!(validate_metric_value(&satisfaction, Some("99.9"), false).is_ok());
}

#[test]
fn test_boolean_requires_exact_yes_or_no() {
    let accessible: MetricDefinition = metric("Accessible", DataKind::Boolean, None);
    assert!(validate_metric_value(&accessible, Some("Yes"), false).is_ok());
    assert!(validate_metric_value(&accessible, Some("No"), false).is_ok());

    let err: ValueRejection = rejection(&accessible, "yes");
    assert_eq!(err.message, "'Accessible' must be either 'Yes' or 'No'.");
    assert_eq!(err.reason, RejectionReason::NotYesNo);
}

#[test]
fn test_single_option_lists_valid_options() {
    let rag: MetricDefinition = metric("RAG", DataKind::SingleOption, Some("Red,Amber,Green"));
    assert!(validate_metric_value(&rag, Some("Amber"), false).is_ok());
    assert_eq!(
        rejection(&rag, "Blue").message,
        "'RAG' must be one of: Red, Amber, Green"
    );
}

#[test]
fn test_multiple_option_names_first_invalid_token() {
    let channels: MetricDefinition = metric("Channels", DataKind::MultipleOption, Some("A,B,C"));
    assert!(validate_metric_value(&channels, Some("A, C"), false).is_ok());

    let err: ValueRejection = rejection(&channels, "A, D, E");
    assert_eq!(
        err.message,
        "'Channels' contains invalid option: D. Valid options are: A, B, C"
    );
    assert_eq!(
        err.reason,
        RejectionReason::InvalidOption {
            token: String::from("D")
        }
    );
}

#[test]
fn test_option_kind_without_options_accepts_anything() {
    let channels: MetricDefinition = metric("Channels", DataKind::SingleOption, None);
    assert!(validate_metric_value(&channels, Some("anything"), false).is_ok());
}

#[test]
fn test_text_accepts_anything() {
    let notes: MetricDefinition = metric("Notes", DataKind::Text, None);
    assert!(validate_metric_value(&notes, Some("free text, with commas"), false).is_ok());
}

#[test]
fn test_null_return_allowed_short_circuits() {
    let mut uptime: MetricDefinition = metric("Uptime", DataKind::Number, Some("min:0,max:100"));
    uptime.mandatory = true;
    uptime.null_return_allowed = true;

    assert!(validate_metric_value(&uptime, None, true).is_ok());
    assert!(validate_metric_value(&uptime, Some("not a number"), true).is_ok());
}

#[test]
fn test_null_return_ignored_when_not_allowed() {
    let mut uptime: MetricDefinition = metric("Uptime", DataKind::Number, None);
    uptime.mandatory = true;

    let err: ValueRejection = validate_metric_value(&uptime, Some("   "), true).unwrap_err();
    assert_eq!(err.message, "'Uptime' is mandatory and must be completed.");
    assert_eq!(err.reason, RejectionReason::MissingMandatory);
}

#[test]
fn test_blank_optional_value_is_valid_for_every_kind() {
    for kind in [
        DataKind::Number,
        DataKind::Decimal,
        DataKind::Percentage,
        DataKind::Boolean,
        DataKind::SingleOption,
        DataKind::MultipleOption,
        DataKind::Text,
    ] {
        let optional: MetricDefinition = metric("Optional", kind, None);
        assert!(validate_metric_value(&optional, None, false).is_ok());
        assert!(validate_metric_value(&optional, Some(" "), false).is_ok());
    }
}

#[test]
fn test_unparsable_bound_is_not_enforced() {
    let uptime: MetricDefinition = metric("Uptime", DataKind::Number, Some("min:abc,max:10"));
    assert!(validate_metric_value(&uptime, Some("-5"), false).is_ok());
    assert!(validate_metric_value(&uptime, Some("11"), false).is_err());
}

#[test]
fn test_validation_is_repeatable() {
    let uptime: MetricDefinition = metric("Uptime", DataKind::Number, Some("min:0,max:100"));
    let first: Result<(), ValueRejection> = validate_metric_value(&uptime, Some("150"), false);
    let second: Result<(), ValueRejection> = validate_metric_value(&uptime, Some("150"), false);
    assert_eq!(first, second);
}

#[test]
fn test_definition_with_clean_criteria_is_valid() {
    let uptime: MetricDefinition = metric("Uptime", DataKind::Number, Some("min:0,max:100"));
    assert!(validate_metric_definition(&uptime).is_ok());
}

#[test]
fn test_definition_with_mismatched_criteria_is_rejected() {
    let rag: MetricDefinition = metric("RAG", DataKind::Number, Some("Red,Amber,Green"));
    let err: DomainError = validate_metric_definition(&rag).unwrap_err();
    assert!(matches!(err, DomainError::InvalidCriteria { ref issues, .. } if issues.len() == 3));
}

#[test]
fn test_definition_requires_name_and_unique_id() {
    let unnamed: MetricDefinition = MetricDefinition::new("PM-9", "  ", DataKind::Text);
    assert!(matches!(
        validate_metric_definition(&unnamed),
        Err(DomainError::InvalidMetricName(_))
    ));

    let spaced: MetricDefinition = MetricDefinition::new("PM 9", "Name", DataKind::Text);
    assert!(matches!(
        validate_metric_definition(&spaced),
        Err(DomainError::InvalidUniqueId(_))
    ));
}
