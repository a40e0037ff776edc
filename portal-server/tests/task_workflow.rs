//! Task assignment and status update tests against an in-memory database.

use chrono::NaiveDate;
use portal_server::ServerState;
use portal_server::db::DbService;
use portal_server::db::models::{HrCreate, TaskCreate};
use portal_server::db::repository::{
    EmployeeRepository, HrRepository, RepoError, TaskRepository,
};
use shared::models::{EmployeeCreateRequest, TaskPriority, TaskStatus};
use std::time::Duration;
use surrealdb::RecordId;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn setup() -> (DbService, RecordId, RecordId) {
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
    let hr_id = hr.id.unwrap();

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
            hr_id.clone(),
        )
        .await
        .unwrap();

    (db, hr_id, employee.id.unwrap())
}

fn task_payload(hr: &RecordId, employee: &RecordId, title: &str) -> TaskCreate {
    TaskCreate {
        employee: employee.clone(),
        hr: hr.clone(),
        title: title.to_string(),
        description: "Quarterly report".to_string(),
        due_date: day("2099-06-30"),
        priority: TaskPriority::High,
    }
}

#[tokio::test]
async fn create_starts_pending_with_given_fields() {
    let (db, hr, employee) = setup().await;
    let repo = TaskRepository::new(&db);

    let task = repo
        .create(task_payload(&hr, &employee, "Write report"))
        .await
        .unwrap();

    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.priority, TaskPriority::High);
    assert_eq!(task.title, "Write report");
    assert_eq!(task.employee, employee);
    assert_eq!(task.hr, hr);

    let fetched = repo
        .find_by_id(&task.id.unwrap())
        .await
        .unwrap()
        .expect("created task should be readable");
    assert_eq!(fetched.title, "Write report");
}

#[tokio::test]
async fn listings_are_scoped_and_newest_first() {
    let (db, hr, employee) = setup().await;
    let repo = TaskRepository::new(&db);

    repo.create(task_payload(&hr, &employee, "First"))
        .await
        .unwrap();
    // created_at has millisecond resolution
    tokio::time::sleep(Duration::from_millis(5)).await;
    repo.create(task_payload(&hr, &employee, "Second"))
        .await
        .unwrap();

    let mine = repo.find_by_employee(&employee).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].title, "Second");
    assert_eq!(mine[1].title, "First");

    let assigned = repo.find_by_hr(&hr).await.unwrap();
    assert_eq!(assigned.len(), 2);

    let stranger = RecordId::from_table_key("employee", "nobody");
    assert!(repo.find_by_employee(&stranger).await.unwrap().is_empty());
}

#[tokio::test]
async fn status_moves_through_progress_to_completed() {
    let (db, hr, employee) = setup().await;
    let repo = TaskRepository::new(&db);

    let task = repo
        .create(task_payload(&hr, &employee, "Write report"))
        .await
        .unwrap();
    let id = task.id.unwrap();

    let in_progress = repo
        .update_status(&id, TaskStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(in_progress.status, TaskStatus::InProgress);

    let completed = repo.update_status(&id, TaskStatus::Completed).await.unwrap();
    assert_eq!(completed.status, TaskStatus::Completed);

    let stored = repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, TaskStatus::Completed);
}

#[tokio::test]
async fn status_update_on_unknown_task_is_not_found() {
    let (db, _, _) = setup().await;
    let repo = TaskRepository::new(&db);

    let ghost = RecordId::from_table_key("task", "nope");
    let err = repo
        .update_status(&ghost, TaskStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)), "got {err:?}");
}
