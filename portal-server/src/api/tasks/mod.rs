//! Task API 模块 (任务分配)
//!
//! HR 给员工派发任务；员工只能更新自己名下任务的状态。

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch},
};

use crate::auth::{require_employee, require_hr};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tasks", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route_layer(axum_middleware::from_fn(require_hr))
        .merge(
            Router::new()
                .route("/my-tasks/", get(handler::my_tasks))
                .route("/{id}/", patch(handler::update_status))
                .route_layer(axum_middleware::from_fn(require_employee)),
        )
}
