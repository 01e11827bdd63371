use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{AppState, captcha::SessionIssue, error::AppError};

use super::model::VerifyRequest;

// 提交人机验证结果，通过后签发会话令牌
pub async fn verify_cap(
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<SessionIssue>, AppError> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!("Rejected verify body: {}", e);
        AppError::InvalidBody
    })?;
    Ok(Json(state.gate.issue_session(&req.token).await))
}
