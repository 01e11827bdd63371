use axum::Json;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 需要重新验证的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeReason {
    /// 没有令牌、令牌过期或已失效
    Session,
    /// 累计下发车辆数达到阈值
    Usage,
}

/// 对外可见的错误
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Rate limit exceeded")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Challenge required ({reason:?})")]
    ChallengeRequired {
        reason: ChallengeReason,
        vehicle_count: Option<u64>,
    },

    #[error("Invalid bounds")]
    InvalidBounds,

    #[error("Invalid request body")]
    InvalidBody,
}

/// 上游数据源请求错误
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("upstream transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// 人机验证服务错误
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("verification request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after: Option<u64>,
}

#[derive(Serialize)]
struct ChallengeResponse {
    cap_required: bool,
    reason: ChallengeReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_count: Option<u64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::RateLimitExceeded { retry_after } => {
                let body = Json(ErrorResponse {
                    error: self.to_string(),
                    retry_after: Some(retry_after),
                });
                let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
                response
            }
            AppError::ChallengeRequired {
                reason,
                vehicle_count,
            } => (
                StatusCode::FORBIDDEN,
                Json(ChallengeResponse {
                    cap_required: true,
                    reason,
                    vehicle_count,
                }),
            )
                .into_response(),
            AppError::InvalidBounds | AppError::InvalidBody => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: self.to_string(),
                    retry_after: None,
                }),
            )
                .into_response(),
        }
    }
}
