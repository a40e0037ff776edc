//! Attendance marking and checkout tests against an in-memory database.

use chrono::{NaiveDate, NaiveTime};
use portal_server::ServerState;
use portal_server::db::DbService;
use portal_server::db::models::HrCreate;
use portal_server::db::repository::{
    AttendanceFilter, AttendanceRepository, EmployeeRepository, HrRepository, RepoError,
};
use shared::models::{AttendanceStatus, AttendanceUpdateRequest, EmployeeCreateRequest};
use surrealdb::RecordId;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn at(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
}

async fn setup() -> (DbService, RecordId) {
    let state = ServerState::initialize_in_memory().await.unwrap();
    let db = state.db_service();

    let hr = HrRepository::new(&db)
        .create(&HrCreate {
            name: "HR Admin".into(),
            email: "hr@example.com".into(),
            password: "hr-password".into(),
            department: "Human Resources".into(),
        })
        .await
        .unwrap();

    let employee = EmployeeRepository::new(&db)
        .create(
            &EmployeeCreateRequest {
                name: "Jane Roe".into(),
                email: "jane@example.com".into(),
                password: "jane-password".into(),
                department: "Sales".into(),
                designation: "Account Manager".into(),
                salary: "4200.50".parse().unwrap(),
                phone: None,
                address: None,
            },
            hr.id.clone().unwrap(),
        )
        .await
        .unwrap();

    (db, employee.id.unwrap())
}

async fn mark(
    repo: &AttendanceRepository,
    employee: &RecordId,
    date: &str,
) -> Result<portal_server::db::models::AttendanceRecord, RepoError> {
    repo.mark(employee, "Jane Roe", "Sales", day(date), at("09:00:00"))
        .await
}

#[tokio::test]
async fn mark_creates_present_record_with_check_in() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    let record = mark(&repo, &employee, "2099-01-10").await.unwrap();
    assert_eq!(record.status, AttendanceStatus::Present);
    assert_eq!(record.check_in, Some(at("09:00:00")));
    assert!(record.check_out.is_none());
}

#[tokio::test]
async fn marking_twice_same_day_is_rejected() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    mark(&repo, &employee, "2099-01-10").await.unwrap();
    let err = mark(&repo, &employee, "2099-01-10").await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "got {err:?}");

    // A different day is a fresh record
    mark(&repo, &employee, "2099-01-11").await.unwrap();
}

#[tokio::test]
async fn checkout_records_time_once() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    mark(&repo, &employee, "2099-01-10").await.unwrap();

    let record = repo
        .checkout(&employee, day("2099-01-10"), at("17:30:00"))
        .await
        .unwrap();
    assert_eq!(record.check_out, Some(at("17:30:00")));

    let err = repo
        .checkout(&employee, day("2099-01-10"), at("18:00:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)), "got {err:?}");

    // First checkout time is preserved
    let stored = repo
        .find_for_day(&employee, day("2099-01-10"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.check_out, Some(at("17:30:00")));
}

#[tokio::test]
async fn checkout_without_mark_is_not_found() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    let err = repo
        .checkout(&employee, day("2099-01-10"), at("17:00:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn concurrent_checkouts_only_one_wins() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    mark(&repo, &employee, "2099-01-10").await.unwrap();

    let (a, b) = tokio::join!(
        repo.checkout(&employee, day("2099-01-10"), at("17:00:00")),
        repo.checkout(&employee, day("2099-01-10"), at("17:00:01"))
    );
    let wins = [a.is_ok(), b.is_ok()].iter().filter(|w| **w).count();
    assert_eq!(wins, 1, "exactly one checkout must win: {a:?} / {b:?}");
}

#[tokio::test]
async fn counts_track_present_days_only() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    mark(&repo, &employee, "2099-01-10").await.unwrap();
    mark(&repo, &employee, "2099-01-11").await.unwrap();
    repo.upsert_leave_day(&employee, "Jane Roe", "Sales", day("2099-01-12"))
        .await
        .unwrap();

    let (total, present) = repo.counts(&employee, None, None).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(present, 2);
}

#[tokio::test]
async fn counts_honor_a_date_range() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    mark(&repo, &employee, "2099-01-10").await.unwrap();
    mark(&repo, &employee, "2099-01-11").await.unwrap();
    repo.upsert_leave_day(&employee, "Jane Roe", "Sales", day("2099-01-12"))
        .await
        .unwrap();
    mark(&repo, &employee, "2099-02-01").await.unwrap();

    // January only
    let (total, present) = repo
        .counts(&employee, Some(day("2099-01-01")), Some(day("2099-01-31")))
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(present, 2);

    // Open-ended lower bound
    let (total, present) = repo
        .counts(&employee, Some(day("2099-01-12")), None)
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(present, 1);

    // A range with no records
    let (total, present) = repo
        .counts(&employee, Some(day("2099-03-01")), Some(day("2099-03-31")))
        .await
        .unwrap();
    assert_eq!(total, 0);
    assert_eq!(present, 0);
}

#[tokio::test]
async fn hr_correction_updates_status_and_times() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    let record = mark(&repo, &employee, "2099-01-10").await.unwrap();
    let id = record.id.unwrap();

    let updated = repo
        .update(
            &id,
            &AttendanceUpdateRequest {
                status: Some(AttendanceStatus::Absent),
                check_in: None,
                check_out: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, AttendanceStatus::Absent);
    // Untouched fields survive a partial update
    assert_eq!(updated.check_in, Some(at("09:00:00")));
}

#[tokio::test]
async fn list_filters_by_date_and_department() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    mark(&repo, &employee, "2099-01-10").await.unwrap();
    mark(&repo, &employee, "2099-01-11").await.unwrap();

    let on_day = repo
        .list(AttendanceFilter {
            date: Some(day("2099-01-10")),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(on_day.len(), 1);

    let sales = repo
        .list(AttendanceFilter {
            department: Some("Sales".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(sales.len(), 2);

    let other = repo
        .list(AttendanceFilter {
            department: Some("Engineering".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(other.is_empty());

    let named = repo
        .list(AttendanceFilter {
            name_query: Some("jane".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(named.len(), 2);
}

#[tokio::test]
async fn leave_day_overwrites_existing_mark() {
    let (db, employee) = setup().await;
    let repo = AttendanceRepository::new(&db);

    mark(&repo, &employee, "2099-01-10").await.unwrap();
    repo.upsert_leave_day(&employee, "Jane Roe", "Sales", day("2099-01-10"))
        .await
        .unwrap();

    let row = repo
        .find_for_day(&employee, day("2099-01-10"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, AttendanceStatus::OnLeave);
    assert!(row.check_in.is_none());
    assert!(row.check_out.is_none());

    let (total, _) = repo.counts(&employee, None, None).await.unwrap();
    assert_eq!(total, 1, "overwrite must not duplicate the day");
}
