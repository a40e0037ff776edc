//! End-to-end HTTP tests through the full router, middleware included.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use portal_server::ServerState;
use portal_server::api::build_app;
use portal_server::auth::{ROLE_EMPLOYEE, ROLE_HR};
use portal_server::db::models::HrCreate;
use portal_server::db::repository::{AttendanceRepository, EmployeeRepository, HrRepository};
use serde_json::{Value, json};
use shared::models::EmployeeCreateRequest;
use surrealdb::RecordId;
use tower::ServiceExt;

struct TestApp {
    app: Router,
    state: ServerState,
    hr_token: String,
    employee_token: String,
    employee_id: RecordId,
}

async fn spawn_app() -> TestApp {
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
    let employee_id = employee.id.unwrap();

    let jwt = state.get_jwt_service();
    let hr_token = jwt
        .generate_token(&hr_id.to_string(), "HR Admin", "hr@example.com", ROLE_HR)
        .unwrap();
    let employee_token = jwt
        .generate_token(
            &employee_id.to_string(),
            "John Doe",
            "john@example.com",
            ROLE_EMPLOYEE,
        )
        .unwrap();

    TestApp {
        app: build_app(state.clone()),
        state,
        hr_token,
        employee_token,
        employee_id,
    }
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn login_returns_token_and_rejects_bad_password() {
    let t = spawn_app().await;

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/auth/login/",
            None,
            Some(json!({"email": "hr@example.com", "password": "hr-password"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "hr");
    assert!(body["token"].as_str().unwrap().len() > 20);
    assert_eq!(body["user"]["email"], "hr@example.com");

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/auth/login/",
            None,
            Some(json!({"email": "hr@example.com", "password": "wrong"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0006");
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn unknown_email_gets_the_same_error_as_bad_password() {
    let t = spawn_app().await;

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/auth/login/",
            None,
            Some(json!({"email": "nobody@example.com", "password": "whatever"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0006");
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let t = spawn_app().await;

    let (status, body) = send(&t.app, request("GET", "/api/leave/mine/", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, body) = send(
        &t.app,
        request("GET", "/api/leave/mine/", Some("not-a-jwt"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn role_boundaries_are_enforced() {
    let t = spawn_app().await;

    // Employee on an HR route
    let (status, body) = send(
        &t.app,
        request("GET", "/api/leave/pending/", Some(&t.employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    // HR on an employee route
    let (status, body) = send(
        &t.app,
        request("GET", "/api/leave/mine/", Some(&t.hr_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");
}

#[tokio::test]
async fn leave_date_validation_reports_field_problems() {
    let t = spawn_app().await;

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/leave/request/",
            Some(&t.employee_token),
            Some(json!({
                "start_date": "2099-01-12",
                "end_date": "2099-01-10",
                "reason": "Trip"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
    assert_eq!(body["message"], "start_date cannot be after end_date.");

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/leave/request/",
            Some(&t.employee_token),
            Some(json!({
                "start_date": "2099/01/10",
                "end_date": "2099-01-12",
                "reason": "Trip"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
    assert_eq!(body["message"], "Invalid date format. Use YYYY-MM-DD.");

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/leave/request/",
            Some(&t.employee_token),
            Some(json!({"reason": "Trip"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "start_date and end_date are required");
}

#[tokio::test]
async fn leave_approval_is_terminal_over_http() {
    let t = spawn_app().await;

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/leave/request/",
            Some(&t.employee_token),
            Some(json!({
                "start_date": "2099-01-10",
                "end_date": "2099-01-11",
                "reason": "Family visit"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Pending");
    let leave_id = body["id"].as_str().unwrap().to_string();

    let action_uri = format!("/api/leave/action/{leave_id}/");
    let (status, body) = send(
        &t.app,
        request(
            "POST",
            &action_uri,
            Some(&t.hr_token),
            Some(json!({"action": "approve"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Approved");

    // Second decision hits the already-resolved row
    let (status, body) = send(
        &t.app,
        request(
            "POST",
            &action_uri,
            Some(&t.hr_token),
            Some(json!({"action": "reject"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    let (status, body) = send(
        &t.app,
        request(
            "POST",
            &action_uri,
            Some(&t.hr_token),
            Some(json!({"action": "escalate"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn marking_attendance_twice_conflicts_over_http() {
    let t = spawn_app().await;

    let (status, body) = send(
        &t.app,
        request("POST", "/api/attendance/mark/", Some(&t.employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Present");
    assert!(body["check_in"].is_string());

    let (status, body) = send(
        &t.app,
        request("POST", "/api/attendance/mark/", Some(&t.employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
    assert_eq!(body["message"], "Attendance already marked for today.");

    // Checkout works once, then conflicts
    let (status, _) = send(
        &t.app,
        request("POST", "/api/attendance/checkout/", Some(&t.employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &t.app,
        request("POST", "/api/attendance/checkout/", Some(&t.employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Already checked out for today.");
}

#[tokio::test]
async fn approved_leave_blocks_marking_attendance() {
    let t = spawn_app().await;

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/leave/request/",
            Some(&t.employee_token),
            Some(json!({"start_date": today, "end_date": today, "reason": "Sick"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let leave_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &t.app,
        request(
            "POST",
            &format!("/api/leave/action/{leave_id}/"),
            Some(&t.hr_token),
            Some(json!({"action": "approve"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &t.app,
        request("POST", "/api/attendance/mark/", Some(&t.employee_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Leave approved for today; cannot mark attendance.");
}

#[tokio::test]
async fn employees_cannot_touch_each_others_tasks() {
    let t = spawn_app().await;
    let db = t.state.db_service();

    let other = EmployeeRepository::new(&db)
        .create(
            &EmployeeCreateRequest {
                name: "Jane Roe".into(),
                email: "jane@example.com".into(),
                password: "jane-password".into(),
                department: "Sales".into(),
                designation: "Account Manager".into(),
                salary: "4000".parse().unwrap(),
                phone: None,
                address: None,
            },
            RecordId::from_table_key("hr", "seed"),
        )
        .await
        .unwrap();
    let other_token = t
        .state
        .get_jwt_service()
        .generate_token(
            &other.id.unwrap().to_string(),
            "Jane Roe",
            "jane@example.com",
            ROLE_EMPLOYEE,
        )
        .unwrap();

    // HR assigns a task to John
    let (status, body) = send(
        &t.app,
        request(
            "POST",
            "/api/tasks/",
            Some(&t.hr_token),
            Some(json!({
                "employee": t.employee_id.to_string(),
                "title": "Write report",
                "description": "Quarterly numbers",
                "due_date": "2099-06-30",
                "priority": "High"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = body["id"].as_str().unwrap().to_string();
    let task_uri = format!("/api/tasks/{task_id}/");

    // Jane cannot update John's task
    let (status, body) = send(
        &t.app,
        request(
            "PATCH",
            &task_uri,
            Some(&other_token),
            Some(json!({"status": "Completed"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    // John can
    let (status, body) = send(
        &t.app,
        request(
            "PATCH",
            &task_uri,
            Some(&t.employee_token),
            Some(json!({"status": "In Progress"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "In Progress");
}

#[tokio::test]
async fn employee_creation_validates_and_rejects_duplicates() {
    let t = spawn_app().await;

    let payload = json!({
        "name": "New Hire",
        "email": "new@example.com",
        "password": "new-password",
        "department": "Sales",
        "designation": "Analyst",
        "salary": "3500"
    });

    let (status, body) = send(
        &t.app,
        request("POST", "/api/employee/create/", Some(&t.hr_token), Some(payload.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "new@example.com");
    // The password hash never leaves the server
    assert!(body.get("hash_pass").is_none());
    assert!(body.get("password").is_none());

    let (status, body) = send(
        &t.app,
        request("POST", "/api/employee/create/", Some(&t.hr_token), Some(payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn attendance_percentage_reports_ratio_or_404() {
    let t = spawn_app().await;
    let db = t.state.db_service();

    // Seed three days, two of them present
    let repo = AttendanceRepository::new(&db);
    for date in ["2099-01-10", "2099-01-11"] {
        repo.mark(
            &t.employee_id,
            "John Doe",
            "Engineering",
            chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        )
        .await
        .unwrap();
    }
    repo.upsert_leave_day(
        &t.employee_id,
        "John Doe",
        "Engineering",
        chrono::NaiveDate::parse_from_str("2099-01-12", "%Y-%m-%d").unwrap(),
    )
    .await
    .unwrap();

    let uri = format!("/api/attendance-percentage/{}/", t.employee_id);
    let (status, body) = send(&t.app, request("GET", &uri, Some(&t.hr_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employee_name"], "John Doe");
    assert_eq!(body["total_days"], 3);
    assert_eq!(body["present_days"], 2);
    assert_eq!(body["attendance_percentage"], 66.67);

    let (status, body) = send(
        &t.app,
        request("GET", "/api/attendance-percentage/employee:ghost/", Some(&t.hr_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");

    // A date range narrows the computation to matching days
    let uri = format!(
        "/api/attendance-percentage/{}/?start_date=2099-01-11&end_date=2099-01-12",
        t.employee_id
    );
    let (status, body) = send(&t.app, request("GET", &uri, Some(&t.hr_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_days"], 2);
    assert_eq!(body["present_days"], 1);
    assert_eq!(body["attendance_percentage"], 50.0);

    // An inverted range is a validation error
    let uri = format!(
        "/api/attendance-percentage/{}/?start_date=2099-01-12&end_date=2099-01-10",
        t.employee_id
    );
    let (status, body) = send(&t.app, request("GET", &uri, Some(&t.hr_token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn health_is_public() {
    let t = spawn_app().await;

    let (status, body) = send(&t.app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
