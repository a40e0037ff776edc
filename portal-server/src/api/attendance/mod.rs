//! Attendance API 模块 (考勤流程)
//!
//! 员工打卡/签退和查看自己的统计；HR 查询、修正和分析考勤。

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::auth::{require_employee, require_hr};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/attendance", routes())
        .route(
            "/api/attendance-percentage/{employee_id}/",
            get(handler::percentage).route_layer(axum_middleware::from_fn(require_hr)),
        )
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/mark/", post(handler::mark))
        .route("/checkout/", post(handler::checkout))
        .route("/stats/employee/", get(handler::employee_stats))
        .route_layer(axum_middleware::from_fn(require_employee))
        .merge(
            Router::new()
                .route("/", get(handler::list))
                .route("/{id}/update/", put(handler::update))
                .route("/stats/hr/", get(handler::hr_stats))
                .route_layer(axum_middleware::from_fn(require_hr)),
        )
}
