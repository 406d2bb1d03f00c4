// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Metric definitions and their validation criteria.
//!
//! Criteria are stored as free text (`"min:0,max:100"` or `"Red,Amber,Green"`).
//! They are parsed exactly once, when a definition is built, into a
//! [`ValidationCriteria`] value. Anything in the text that does not fit the
//! metric's data kind is reported as a [`CriteriaIssue`] rather than being
//! silently reinterpreted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// The kind of answer a metric expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// A whole number.
    Number,
    /// A decimal number.
    Decimal,
    /// A percentage, entered as a plain number.
    Percentage,
    /// `Yes` or `No`.
    Boolean,
    /// Exactly one entry from the configured option list.
    SingleOption,
    /// A comma-separated selection from the configured option list.
    MultipleOption,
    /// Free text.
    Text,
}

impl DataKind {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Decimal => "decimal",
            Self::Percentage => "percentage",
            Self::Boolean => "boolean",
            Self::SingleOption => "single_option",
            Self::MultipleOption => "multiple_option",
            Self::Text => "text",
        }
    }

    /// Returns true for kinds whose criteria are a numeric range.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Decimal | Self::Percentage)
    }

    /// Returns true for kinds whose criteria are an option list.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self, Self::SingleOption | Self::MultipleOption)
    }
}

impl FromStr for DataKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" => Ok(Self::Number),
            "decimal" => Ok(Self::Decimal),
            "percentage" => Ok(Self::Percentage),
            "boolean" => Ok(Self::Boolean),
            "single_option" => Ok(Self::SingleOption),
            "multiple_option" => Ok(Self::MultipleOption),
            "text" => Ok(Self::Text),
            _ => Err(DomainError::UnknownDataKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `min:` or `max:` clause. Both are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Min(Decimal),
    Max(Decimal),
}

/// Numeric bounds in the order they were configured.
///
/// Every bound is enforced, and the first one a value violates is the one
/// reported. Either side may be open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumericRange {
    bounds: Vec<RangeBound>,
}

impl NumericRange {
    #[must_use]
    pub const fn new(bounds: Vec<RangeBound>) -> Self {
        Self { bounds }
    }

    #[must_use]
    pub fn bounds(&self) -> &[RangeBound] {
        &self.bounds
    }

    /// The tightest configured minimum.
    #[must_use]
    pub fn min(&self) -> Option<Decimal> {
        self.bounds
            .iter()
            .filter_map(|bound| match bound {
                RangeBound::Min(min) => Some(*min),
                RangeBound::Max(_) => None,
            })
            .max()
    }

    /// The tightest configured maximum.
    #[must_use]
    pub fn max(&self) -> Option<Decimal> {
        self.bounds
            .iter()
            .filter_map(|bound| match bound {
                RangeBound::Max(max) => Some(*max),
                RangeBound::Min(_) => None,
            })
            .min()
    }
}

/// Parsed validation criteria.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationCriteria {
    /// No constraint beyond the data kind itself.
    #[default]
    None,
    /// Numeric bounds.
    Range(NumericRange),
    /// Permitted option labels, in configured order.
    Options(Vec<String>),
}

/// A problem found while parsing criteria text against a data kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaIssue {
    /// A `min:` or `max:` clause whose bound is not a number. The bound is not enforced.
    InvalidBound {
        clause: String,
    },
    /// A clause on a numeric kind that is neither `min:` nor `max:`. It is ignored.
    UnrecognisedClause {
        clause: String,
    },
    /// A bound given more than once. Every occurrence is enforced.
    DuplicateBound {
        clause: String,
    },
    /// The minimum exceeds the maximum, so no value can pass.
    EmptyRange {
        min: Decimal,
        max: Decimal,
    },
    /// An option list contains what looks like a range clause.
    RangeClauseInOptions {
        clause: String,
    },
    /// An option kind has no options configured, so any answer is accepted.
    MissingOptions,
    /// Criteria were supplied for a kind that never reads them.
    Ignored {
        kind: DataKind,
    },
}

impl std::fmt::Display for CriteriaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBound { clause } => write!(f, "bound in '{clause}' is not a number"),
            Self::UnrecognisedClause { clause } => {
                write!(f, "'{clause}' is not a min: or max: clause")
            }
            Self::DuplicateBound { clause } => write!(f, "'{clause}' repeats an earlier bound"),
            Self::EmptyRange { min, max } => {
                write!(f, "minimum {min} is greater than maximum {max}")
            }
            Self::RangeClauseInOptions { clause } => {
                write!(f, "option '{clause}' looks like a range clause")
            }
            Self::MissingOptions => write!(f, "no options are configured"),
            Self::Ignored { kind } => write!(f, "criteria are not used by '{kind}' metrics"),
        }
    }
}

/// Criteria together with every issue found while parsing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCriteria {
    pub criteria: ValidationCriteria,
    pub issues: Vec<CriteriaIssue>,
}

impl ValidationCriteria {
    /// Parses criteria text for the given data kind.
    ///
    /// Parsing never fails. Numeric kinds read comma-separated `min:<n>` and
    /// `max:<n>` clauses (surrounding double quotes are stripped). Option
    /// kinds read a comma-separated list of labels. Everything that does not
    /// fit is returned in `issues`.
    #[must_use]
    pub fn parse(kind: DataKind, raw: Option<&str>) -> ParsedCriteria {
        let text: &str = raw.map_or("", str::trim);

        if kind.is_numeric() {
            return parse_range(text);
        }

        if kind.is_option() {
            return parse_options(text);
        }

        let issues: Vec<CriteriaIssue> = if text.is_empty() {
            Vec::new()
        } else {
            vec![CriteriaIssue::Ignored { kind }]
        };
        ParsedCriteria {
            criteria: Self::None,
            issues,
        }
    }
}

fn parse_range(text: &str) -> ParsedCriteria {
    let mut bounds: Vec<RangeBound> = Vec::new();
    let mut issues: Vec<CriteriaIssue> = Vec::new();

    for clause in text.trim_matches('"').split(',').map(str::trim) {
        if clause.is_empty() {
            continue;
        }

        let (bound, is_min) = if let Some(bound) = clause.strip_prefix("min:") {
            (bound, true)
        } else if let Some(bound) = clause.strip_prefix("max:") {
            (bound, false)
        } else {
            issues.push(CriteriaIssue::UnrecognisedClause {
                clause: clause.to_string(),
            });
            continue;
        };

        let Some(value) = parse_plain_decimal(bound.trim()) else {
            issues.push(CriteriaIssue::InvalidBound {
                clause: clause.to_string(),
            });
            continue;
        };

        let repeated: bool = bounds
            .iter()
            .any(|existing| matches!(existing, RangeBound::Min(_)) == is_min);
        if repeated {
            issues.push(CriteriaIssue::DuplicateBound {
                clause: clause.to_string(),
            });
        }

        bounds.push(if is_min {
            RangeBound::Min(value)
        } else {
            RangeBound::Max(value)
        });
    }

    let range: NumericRange = NumericRange::new(bounds);
    if let Some((min, max)) = range.min().zip(range.max()).filter(|(min, max)| min > max) {
        issues.push(CriteriaIssue::EmptyRange { min, max });
    }

    let criteria: ValidationCriteria = if range.bounds().is_empty() {
        ValidationCriteria::None
    } else {
        ValidationCriteria::Range(range)
    };

    ParsedCriteria { criteria, issues }
}

fn parse_options(text: &str) -> ParsedCriteria {
    let options: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(String::from)
        .collect();

    let mut issues: Vec<CriteriaIssue> = options
        .iter()
        .filter(|option| option.starts_with("min:") || option.starts_with("max:"))
        .map(|option| CriteriaIssue::RangeClauseInOptions {
            clause: option.clone(),
        })
        .collect();

    if options.is_empty() {
        issues.push(CriteriaIssue::MissingOptions);
        return ParsedCriteria {
            criteria: ValidationCriteria::None,
            issues,
        };
    }

    ParsedCriteria {
        criteria: ValidationCriteria::Options(options),
        issues,
    }
}

/// A configured performance metric.
///
/// The data kind and criteria are fixed together at construction so the
/// parsed criteria always match the kind they were parsed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDefinition {
    /// Database identifier, `None` until persisted.
    pub metric_id: Option<i64>,
    /// Stable human-facing key such as `"PM-001"`.
    pub unique_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub mandatory: bool,
    pub null_return_allowed: bool,
    /// Lifecycle phases (Alpha, Beta, Live, ...) the metric applies to.
    pub applicable_phases: Vec<String>,
    pub enabled: bool,
    data_kind: DataKind,
    raw_criteria: Option<String>,
    criteria: ValidationCriteria,
    criteria_issues: Vec<CriteriaIssue>,
}

impl MetricDefinition {
    /// Creates an enabled, optional metric with no criteria.
    #[must_use]
    pub fn new(unique_id: &str, name: &str, data_kind: DataKind) -> Self {
        Self {
            metric_id: None,
            unique_id: unique_id.trim().to_string(),
            name: name.trim().to_string(),
            description: None,
            category: String::new(),
            mandatory: false,
            null_return_allowed: false,
            applicable_phases: Vec::new(),
            enabled: true,
            data_kind,
            raw_criteria: None,
            criteria: ValidationCriteria::None,
            criteria_issues: Vec::new(),
        }
    }

    /// Replaces the criteria text and re-parses it for this metric's kind.
    #[must_use]
    pub fn with_criteria(mut self, raw: Option<&str>) -> Self {
        let raw: Option<String> = raw
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(String::from);
        let parsed: ParsedCriteria = ValidationCriteria::parse(self.data_kind, raw.as_deref());
        self.raw_criteria = raw;
        self.criteria = parsed.criteria;
        self.criteria_issues = parsed.issues;
        self
    }

    #[must_use]
    pub const fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    /// The criteria text as configured.
    #[must_use]
    pub fn raw_criteria(&self) -> Option<&str> {
        self.raw_criteria.as_deref()
    }

    #[must_use]
    pub const fn criteria(&self) -> &ValidationCriteria {
        &self.criteria
    }

    /// Problems found when the criteria text was parsed.
    #[must_use]
    pub fn criteria_issues(&self) -> &[CriteriaIssue] {
        &self.criteria_issues
    }
}

/// Parses a plain decimal literal: an optional sign, then digits with an
/// optional fractional part (`12`, `-0.5`, `.25`).
///
/// Exponents and digit separators are refused, as is any value that would
/// need rounding to fit a `Decimal`.
pub fn parse_plain_decimal(value: &str) -> Option<Decimal> {
    let unsigned: &str = value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value);
    let (whole, fraction): (&str, Option<&str>) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    let well_formed: bool = all_digits(whole)
        && fraction.map_or(!whole.is_empty(), |fraction| {
            !fraction.is_empty() && all_digits(fraction)
        });
    if !well_formed {
        return None;
    }
    Decimal::from_str_exact(value).ok()
}
