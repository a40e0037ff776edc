//! Stats API 模块 (仪表盘统计)

mod handler;

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::auth::require_hr;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/counts/",
        get(handler::counts).route_layer(axum_middleware::from_fn(require_hr)),
    )
}
