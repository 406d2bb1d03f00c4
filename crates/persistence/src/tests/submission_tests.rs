// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fips_reporting::Transition;

use crate::{
    MetricValueData, PersistedTransition, Persistence, SUBMITTED_STATUS, SubmissionRecordData,
};

use super::{
    create_seeded_persistence, create_test_period, create_test_reporter, execute_sql, product,
    value_write,
};

fn submit(persistence: &mut Persistence, notes: Option<&str>, resubmission: bool) -> (i64, usize) {
    let transition: Transition = Transition::ReturnSubmitted {
        products: vec![product("FIPS-1"), product("FIPS-2")],
        period: create_test_period(),
        submitted_by: create_test_reporter(),
        notes: notes.map(String::from),
        resubmission,
    };
    match persistence.persist_transition(&transition).unwrap() {
        PersistedTransition::ReturnSubmitted {
            submission_id,
            rows_submitted,
        } => (submission_id, rows_submitted),
        other => panic!("unexpected persisted transition: {other:?}"),
    }
}

#[test]
fn test_no_record_before_submission() {
    let (mut persistence, _, _) = create_seeded_persistence();
    assert!(
        persistence
            .get_submission_record(&create_test_reporter(), &create_test_period())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_submit_return_marks_values_and_creates_record() {
    let (mut persistence, uptime_id, _) = create_seeded_persistence();
    persistence
        .persist_transition(&Transition::ValueRecorded(value_write(
            uptime_id,
            "FIPS-1",
            Some("97"),
        )))
        .unwrap();
    persistence
        .persist_transition(&Transition::ValueRecorded(value_write(
            uptime_id,
            "FIPS-2",
            Some("99"),
        )))
        .unwrap();

    let (_, rows_submitted) = submit(&mut persistence, Some("All good"), false);
    assert_eq!(rows_submitted, 2);

    let record: SubmissionRecordData = persistence
        .get_submission_record(&create_test_reporter(), &create_test_period())
        .unwrap()
        .unwrap();
    assert_eq!(record.status, SUBMITTED_STATUS);
    assert_eq!(record.reporting_period, "2025-august");
    assert_eq!(record.notes.as_deref(), Some("All good"));

    let values: Vec<MetricValueData> = persistence
        .list_values(&[product("FIPS-1"), product("FIPS-2")], &create_test_period())
        .unwrap();
    assert!(values.iter().all(|v| v.is_submitted));
}

#[test]
fn test_resubmission_keeps_single_record() {
    let (mut persistence, _, _) = create_seeded_persistence();

    let (first_id, _) = submit(&mut persistence, Some("first"), false);
    let (second_id, _) = submit(&mut persistence, None, true);

    assert_eq!(first_id, second_id);
    let record: SubmissionRecordData = persistence
        .get_submission_record(&create_test_reporter(), &create_test_period())
        .unwrap()
        .unwrap();
    assert_eq!(record.submission_id, first_id);
    assert_eq!(record.status, SUBMITTED_STATUS);
    assert!(record.notes.is_none());
}

#[test]
fn test_submission_is_scoped_to_period() {
    let (mut persistence, _, _) = create_seeded_persistence();
    submit(&mut persistence, None, false);

    let september = fips_reporting_domain::ReportingPeriod::new(2025, time::Month::September)
        .unwrap();
    assert!(
        persistence
            .get_submission_record(&create_test_reporter(), &september)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_submit_over_existing_record_refreshes_it() {
    let (mut persistence, _, _) = create_seeded_persistence();
    execute_sql(
        &mut persistence,
        "INSERT INTO submission_records (user_email, reporting_period, status, submitted_by, \
         submitted_at, notes, created_at, updated_at) \
         VALUES ('reporter@example.gov.uk', '2025-august', 'Draft', 'someone@example.gov.uk', \
         '2025-08-01T00:00:00Z', 'stale', '2025-08-01T00:00:00Z', '2025-08-01T00:00:00Z')",
    );
    let existing: SubmissionRecordData = persistence
        .get_submission_record(&create_test_reporter(), &create_test_period())
        .unwrap()
        .unwrap();

    let (submission_id, _) = submit(&mut persistence, Some("fresh"), false);

    assert_eq!(submission_id, existing.submission_id);
    let record: SubmissionRecordData = persistence
        .get_submission_record(&create_test_reporter(), &create_test_period())
        .unwrap()
        .unwrap();
    assert_eq!(record.status, SUBMITTED_STATUS);
    assert_eq!(record.submitted_by, "reporter@example.gov.uk");
    assert_eq!(record.notes.as_deref(), Some("fresh"));
    assert_ne!(record.submitted_at, "2025-08-01T00:00:00Z");
}
