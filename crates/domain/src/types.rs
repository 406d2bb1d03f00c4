// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity and calendar value types shared across the reporting domain.

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::error::DomainError;

/// Earliest reporting year accepted.
pub const MIN_REPORTING_YEAR: i32 = 2000;

/// Latest reporting year accepted.
pub const MAX_REPORTING_YEAR: i32 = 2999;

/// Day of the following month on which a monthly return falls due.
pub const DUE_DAY_OF_FOLLOWING_MONTH: u8 = 7;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// A reporter's email address, normalised to lowercase.
///
/// Every ownership check in the system compares these values, so
/// normalisation happens once, here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserEmail(String);

impl UserEmail {
    /// Creates a normalised email address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUserEmail` unless the input has exactly
    /// one `@` with a non-empty part on either side.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let normalized: String = raw.trim().to_lowercase();
        match normalized.split_once('@') {
            Some((local, domain))
                if !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !normalized.contains(char::is_whitespace) =>
            {
                Ok(Self(normalized))
            }
            _ => Err(DomainError::InvalidUserEmail(raw.to_string())),
        }
    }

    /// Returns the normalised address.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// FIPS identifier of a digital product (a "service").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product identifier from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProductId` if the input is blank.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidProductId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One calendar month of reporting.
///
/// The storage key is `"<year>-<lowercase month name>"`, for example
/// `"2025-august"`. Values are keyed on this string everywhere, so it must
/// stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportingPeriod {
    year: i32,
    month: Month,
}

impl ReportingPeriod {
    /// Creates a reporting period.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReportingYear` if the year is outside
    /// `MIN_REPORTING_YEAR..=MAX_REPORTING_YEAR`.
    pub const fn new(year: i32, month: Month) -> Result<Self, DomainError> {
        if year < MIN_REPORTING_YEAR || year > MAX_REPORTING_YEAR {
            return Err(DomainError::InvalidReportingYear(year));
        }
        Ok(Self { year, month })
    }

    /// Creates a reporting period from a year and a month name.
    ///
    /// Month names are matched case-insensitively. Full names, three-letter
    /// abbreviations and month numbers (`1` to `12`) are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is not recognised or the year is out of range.
    pub fn from_parts(year: i32, month: &str) -> Result<Self, DomainError> {
        let month: Month = parse_month(month)?;
        Self::new(year, month)
    }

    /// Parses a storage key such as `"2025-august"`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReportingPeriodKey` if the key is malformed.
    pub fn parse_key(key: &str) -> Result<Self, DomainError> {
        let (year, month) = key
            .trim()
            .split_once('-')
            .ok_or_else(|| DomainError::InvalidReportingPeriodKey(key.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| DomainError::InvalidReportingPeriodKey(key.to_string()))?;
        Self::from_parts(year, month)
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns the storage key, e.g. `"2025-august"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}-{}", self.year, self.month.to_string().to_lowercase())
    }

    /// Returns the human-facing name, e.g. `"August 2025"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.month, self.year)
    }

    /// Returns the date the return for this period is due: the 7th of the
    /// following month.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the date cannot be represented.
    pub fn due_date(&self) -> Result<Date, DomainError> {
        let (year, month) = if self.month == Month::December {
            (self.year + 1, Month::January)
        } else {
            (self.year, self.month.next())
        };
        Date::from_calendar_date(year, month, DUE_DAY_OF_FOLLOWING_MONTH).map_err(|e| {
            DomainError::DateArithmeticOverflow {
                operation: format!("due date for {}: {e}", self.key()),
            }
        })
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

fn parse_month(raw: &str) -> Result<Month, DomainError> {
    let lower: String = raw.trim().to_lowercase();

    if let Ok(number) = lower.parse::<u8>() {
        return Month::try_from(number).map_err(|_| DomainError::InvalidReportingMonth(raw.to_string()));
    }

    MONTHS
        .iter()
        .copied()
        .find(|month| {
            let name: String = month.to_string().to_lowercase();
            name == lower || (lower.len() == 3 && name.starts_with(&lower))
        })
        .ok_or_else(|| DomainError::InvalidReportingMonth(raw.to_string()))
}
