// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Month;

use crate::{
    DomainError, PerformanceStatus, ProductId, ReportingPeriod, ReturnState,
    validate_product_submission, validate_return_submission,
};

fn august() -> ReportingPeriod {
    ReportingPeriod::new(2025, Month::August).unwrap()
}

fn product(id: &str) -> ProductId {
    ProductId::new(id).unwrap()
}

#[test]
fn test_return_state_progression() {
    assert_eq!(ReturnState::derive(&[], false), ReturnState::NotStarted);
    assert_eq!(
        ReturnState::derive(
            &[PerformanceStatus::NotStarted, PerformanceStatus::NotStarted],
            false
        ),
        ReturnState::NotStarted
    );
    assert_eq!(
        ReturnState::derive(
            &[PerformanceStatus::Complete, PerformanceStatus::NotStarted],
            false
        ),
        ReturnState::InProgress
    );
    assert_eq!(
        ReturnState::derive(
            &[PerformanceStatus::Complete, PerformanceStatus::Complete],
            false
        ),
        ReturnState::Complete
    );
    assert_eq!(
        ReturnState::derive(&[PerformanceStatus::InProgress], true),
        ReturnState::Submitted
    );
}

#[test]
fn test_whole_return_gate_lists_incomplete_products() {
    let products: Vec<(ProductId, PerformanceStatus)> = vec![
        (product("FIPS-1"), PerformanceStatus::Complete),
        (product("FIPS-2"), PerformanceStatus::InProgress),
        (product("FIPS-3"), PerformanceStatus::NotStarted),
    ];

    assert_eq!(
        validate_return_submission(&august(), &products),
        Err(DomainError::ReturnIncomplete {
            period: String::from("2025-august"),
            incomplete_products: vec![product("FIPS-2"), product("FIPS-3")],
        })
    );
}

#[test]
fn test_whole_return_gate_passes_when_all_complete() {
    let products: Vec<(ProductId, PerformanceStatus)> = vec![
        (product("FIPS-1"), PerformanceStatus::Complete),
        (product("FIPS-2"), PerformanceStatus::Complete),
    ];
    assert!(validate_return_submission(&august(), &products).is_ok());
}

#[test]
fn test_whole_return_gate_rejects_empty_assignment() {
    assert_eq!(
        validate_return_submission(&august(), &[]),
        Err(DomainError::NoAssignedProducts {
            period: String::from("2025-august")
        })
    );
}

#[test]
fn test_product_gate_requires_complete() {
    assert!(
        validate_product_submission(&august(), &product("FIPS-1"), PerformanceStatus::Complete)
            .is_ok()
    );
    assert!(matches!(
        validate_product_submission(&august(), &product("FIPS-1"), PerformanceStatus::InProgress),
        Err(DomainError::ProductIncomplete {
            status: PerformanceStatus::InProgress,
            ..
        })
    ));
}
