//! Employee API 模块 (员工档案管理)
//!
//! `/api/employee/*` 是 HR 专用的 CRUD 接口；
//! `/api/employees/*` 包含 HR 目录查询和员工自助改密。

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::auth::{require_employee, require_hr};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/employee", crud_routes())
        .nest("/api/employees", directory_routes())
}

fn crud_routes() -> Router<ServerState> {
    Router::new()
        .route("/create/", post(handler::create))
        .route("/{id}/", get(handler::get_by_id))
        .route("/update/{id}/", put(handler::update))
        .route("/delete/{id}/", delete(handler::remove))
        .route_layer(axum_middleware::from_fn(require_hr))
}

fn directory_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/department-count/", get(handler::department_count))
        .route_layer(axum_middleware::from_fn(require_hr))
        .merge(
            Router::new()
                .route("/change-password/", post(handler::change_password))
                .route_layer(axum_middleware::from_fn(require_employee)),
        )
}
