// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fips_reporting_domain::ProductId;

/// A command represents reporter intent as data only.
///
/// Commands are the only way to request changes to a return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Save (create or replace) the value for one metric of one product.
    SaveMetricValue {
        /// The product the value belongs to.
        product_id: ProductId,
        /// The metric being answered.
        metric_id: i64,
        /// The raw value as entered.
        value: Option<String>,
        /// Optional free-text comment.
        comment: Option<String>,
        /// True when the reporter declares there is nothing to report.
        is_null_return: bool,
    },
    /// Submit one product's return.
    SubmitProductReturn {
        /// The product to submit.
        product_id: ProductId,
    },
    /// Submit the reporter's whole return for the period.
    SubmitReturn {
        /// Optional notes stored on the submission record.
        notes: Option<String>,
    },
}
