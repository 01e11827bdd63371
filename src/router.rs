use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    middleware::{log_errors, session_admission},
    routes,
};

// 车辆查询路由，需要会话准入
pub fn vehicle_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/buses", get(routes::vehicle::get_buses))
        .layer(axum::middleware::from_fn_with_state(state, session_admission))
}

// 人机验证路由
pub fn captcha_routes() -> Router<AppState> {
    Router::new().route("/api/cap/verify", post(routes::captcha::verify_cap))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(routes::health::health))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(vehicle_routes(state.clone()))
        .merge(captcha_routes())
        .merge(health_routes())
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}
