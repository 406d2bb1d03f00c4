// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! All writes use Diesel DSL. The only backend-specific helper they need,
//! `get_last_insert_rowid()`, comes from the `PersistenceBackend` trait.
//!
//! - `metrics`: admin metric CRUD
//! - `metric_values`: value upserts and per-product submission
//! - `submissions`: whole-return submission
//! - `assignments`: reporter to product assignments
//! - `transitions`: writes a core `Transition`

pub mod assignments;
pub mod metric_values;
pub mod metrics;
pub mod submissions;
pub mod transitions;
