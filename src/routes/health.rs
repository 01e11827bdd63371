use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{AppState, tracker::TrackerStats};

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 服务状态
    pub status: &'static str,
    /// 服务器时间
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub stats: TrackerStats,
}

/// 健康检查接口
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        stats: state.tracker.stats(),
    })
}
