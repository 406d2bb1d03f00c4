// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every query is written once with Diesel DSL and expanded per backend by
//! `backend_fn!`.
//!
//! - `metrics`: metric definitions
//! - `metric_values`: the value ledger
//! - `submissions`: reporter submission records
//! - `assignments`: reporter to product assignments

pub mod assignments;
pub mod metric_values;
pub mod metrics;
pub mod submissions;
