//! Leave request lifecycle tests against an in-memory database.

use chrono::NaiveDate;
use portal_server::ServerState;
use portal_server::db::DbService;
use portal_server::db::models::{HrCreate, LeaveCreate};
use portal_server::db::repository::{
    AttendanceRepository, EmployeeRepository, HrRepository, LeaveRepository, RepoError,
};
use shared::models::{AttendanceStatus, EmployeeCreateRequest, LeaveStatus};
use surrealdb::RecordId;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn setup() -> (DbService, RecordId, String, String) {
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
                name: "John Doe".into(),
                email: "john@example.com".into(),
                password: "john-password".into(),
                department: "Engineering".into(),
                designation: "Developer".into(),
                salary: "5000".parse().unwrap(),
                phone: None,
                address: None,
            },
            hr.id.clone().unwrap(),
        )
        .await
        .unwrap();

    let employee_id = employee.id.unwrap();
    (db, employee_id, employee.name, employee.department)
}

fn leave_payload(
    employee: &RecordId,
    name: &str,
    department: &str,
    start: &str,
    end: &str,
) -> LeaveCreate {
    LeaveCreate {
        employee: employee.clone(),
        employee_name: name.to_string(),
        department: department.to_string(),
        start_date: day(start),
        end_date: day(end),
        reason: "Family visit".to_string(),
    }
}

#[tokio::test]
async fn submit_creates_pending_request() {
    let (db, employee, name, dept) = setup().await;
    let repo = LeaveRepository::new(&db);

    let leave = repo
        .create(leave_payload(&employee, &name, &dept, "2099-01-10", "2099-01-12"))
        .await
        .unwrap();

    assert_eq!(leave.status, LeaveStatus::Pending);
    assert_eq!(leave.employee_name, name);
    assert_eq!(leave.start_date, day("2099-01-10"));

    let mine = repo.find_mine(&employee).await.unwrap();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn approve_is_terminal_and_reject_conflicts() {
    let (db, employee, name, dept) = setup().await;
    let repo = LeaveRepository::new(&db);

    let leave = repo
        .create(leave_payload(&employee, &name, &dept, "2099-01-10", "2099-01-12"))
        .await
        .unwrap();
    let id = leave.id.unwrap();

    let approved = repo.act(&id, LeaveStatus::Approved).await.unwrap();
    assert_eq!(approved.status, LeaveStatus::Approved);

    let err = repo.act(&id, LeaveStatus::Rejected).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)), "got {err:?}");

    // The stored row keeps the first decision
    let stored = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, LeaveStatus::Approved);
}

#[tokio::test]
async fn act_on_unknown_request_is_not_found() {
    let (db, _, _, _) = setup().await;
    let repo = LeaveRepository::new(&db);

    let ghost = RecordId::from_table_key("leave", "nope");
    let err = repo.act(&ghost, LeaveStatus::Approved).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn overlap_with_approved_leave_conflicts() {
    let (db, employee, name, dept) = setup().await;
    let repo = LeaveRepository::new(&db);

    let first = repo
        .create(leave_payload(&employee, &name, &dept, "2099-01-10", "2099-01-12"))
        .await
        .unwrap();
    repo.act(&first.id.unwrap(), LeaveStatus::Approved)
        .await
        .unwrap();

    // Overlapping range starts inside the approved window
    let err = repo
        .create(leave_payload(&employee, &name, &dept, "2099-01-12", "2099-01-15"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)), "got {err:?}");

    // A disjoint range is fine
    repo.create(leave_payload(&employee, &name, &dept, "2099-01-20", "2099-01-22"))
        .await
        .unwrap();
}

#[tokio::test]
async fn pending_requests_do_not_block_overlap() {
    let (db, employee, name, dept) = setup().await;
    let repo = LeaveRepository::new(&db);

    repo.create(leave_payload(&employee, &name, &dept, "2099-01-10", "2099-01-12"))
        .await
        .unwrap();
    // Still pending, so a second overlapping submission is allowed
    repo.create(leave_payload(&employee, &name, &dept, "2099-01-11", "2099-01-13"))
        .await
        .unwrap();
}

#[tokio::test]
async fn overlapping_pending_requests_cannot_both_be_approved() {
    let (db, employee, name, dept) = setup().await;
    let repo = LeaveRepository::new(&db);

    let first = repo
        .create(leave_payload(&employee, &name, &dept, "2099-01-10", "2099-01-12"))
        .await
        .unwrap();
    let second = repo
        .create(leave_payload(&employee, &name, &dept, "2099-01-11", "2099-01-13"))
        .await
        .unwrap();

    repo.act(&first.id.unwrap(), LeaveStatus::Approved)
        .await
        .unwrap();

    let second_id = second.id.unwrap();
    let err = repo.act(&second_id, LeaveStatus::Approved).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)), "got {err:?}");

    // The blocked request stays Pending and can still be rejected
    let stored = repo.find_by_id(&second_id).await.unwrap().unwrap();
    assert_eq!(stored.status, LeaveStatus::Pending);
    let rejected = repo.act(&second_id, LeaveStatus::Rejected).await.unwrap();
    assert_eq!(rejected.status, LeaveStatus::Rejected);

    // A pending request on disjoint dates approves normally
    let third = repo
        .create(leave_payload(&employee, &name, &dept, "2099-02-01", "2099-02-02"))
        .await
        .unwrap();
    let approved = repo
        .act(&third.id.unwrap(), LeaveStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, LeaveStatus::Approved);
}

#[tokio::test]
async fn concurrent_approvals_only_one_wins() {
    let (db, employee, name, dept) = setup().await;
    let repo = LeaveRepository::new(&db);

    let leave = repo
        .create(leave_payload(&employee, &name, &dept, "2099-01-10", "2099-01-12"))
        .await
        .unwrap();
    let id = leave.id.unwrap();

    let (a, b) = tokio::join!(
        repo.act(&id, LeaveStatus::Approved),
        repo.act(&id, LeaveStatus::Approved)
    );

    let wins = [a.is_ok(), b.is_ok()].iter().filter(|w| **w).count();
    assert_eq!(wins, 1, "exactly one approval must win: {a:?} / {b:?}");
}

#[tokio::test]
async fn approved_leave_days_become_attendance_rows() {
    let (db, employee, name, dept) = setup().await;
    let leaves = LeaveRepository::new(&db);
    let attendance = AttendanceRepository::new(&db);

    let leave = leaves
        .create(leave_payload(&employee, &name, &dept, "2099-01-10", "2099-01-12"))
        .await
        .unwrap();
    let approved = leaves
        .act(&leave.id.unwrap(), LeaveStatus::Approved)
        .await
        .unwrap();

    // Expand the range the way the approval handler does
    let mut d = approved.start_date;
    while d <= approved.end_date {
        attendance
            .upsert_leave_day(&employee, &name, &dept, d)
            .await
            .unwrap();
        d = d.succ_opt().unwrap();
    }

    for date in ["2099-01-10", "2099-01-11", "2099-01-12"] {
        let row = attendance
            .find_for_day(&employee, day(date))
            .await
            .unwrap()
            .expect("leave day should have an attendance row");
        assert_eq!(row.status, AttendanceStatus::OnLeave);
        assert!(row.check_in.is_none());
    }

    assert!(
        leaves.approved_covering(&employee, day("2099-01-11")).await.unwrap()
    );
    assert!(
        !leaves.approved_covering(&employee, day("2099-01-13")).await.unwrap()
    );
}

#[tokio::test]
async fn status_summary_counts_by_state() {
    let (db, employee, name, dept) = setup().await;
    let repo = LeaveRepository::new(&db);

    let a = repo
        .create(leave_payload(&employee, &name, &dept, "2099-01-10", "2099-01-10"))
        .await
        .unwrap();
    repo.act(&a.id.unwrap(), LeaveStatus::Approved).await.unwrap();

    let b = repo
        .create(leave_payload(&employee, &name, &dept, "2099-02-01", "2099-02-02"))
        .await
        .unwrap();
    repo.act(&b.id.unwrap(), LeaveStatus::Rejected).await.unwrap();

    repo.create(leave_payload(&employee, &name, &dept, "2099-03-01", "2099-03-02"))
        .await
        .unwrap();

    let summary = repo.status_summary().await.unwrap();
    assert_eq!(summary.approved, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.pending, 1);

    let mine = repo.summary_for(&employee).await.unwrap();
    assert_eq!(mine.approved, 1);
    assert_eq!(mine.pending, 1);
}
