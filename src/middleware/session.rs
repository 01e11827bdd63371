use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;

/// 会话令牌请求头
pub const SESSION_HEADER: &str = "x-session-token";

/// 会话准入中间件
pub async fn session_admission(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let session_token = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim);

    match state.gate.admit_session(session_token).into_result() {
        Ok(()) => next.run(req).await,
        Err(e) => {
            tracing::info!("Session admission denied: {}", e);
            e.into_response()
        }
    }
}
