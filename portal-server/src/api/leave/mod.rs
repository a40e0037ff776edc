//! Leave API 模块 (请假流程)
//!
//! 员工提交和查询自己的请假；HR 审批待处理请求。
//! 审批通过后对应日期自动写入 Leave 考勤记录。

mod handler;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::auth::{require_employee, require_hr};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/leave", routes())
        .route(
            "/api/leaves/status-summary/",
            get(handler::status_summary)
                .route_layer(axum_middleware::from_fn(require_hr)),
        )
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/request/", post(handler::submit))
        .route("/mine/", get(handler::mine))
        .route("/summary/", get(handler::summary))
        .route_layer(axum_middleware::from_fn(require_employee))
        .merge(
            Router::new()
                .route("/pending/", get(handler::pending))
                .route("/action/{id}/", post(handler::act))
                .route_layer(axum_middleware::from_fn(require_hr)),
        )
}
