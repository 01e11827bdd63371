use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{AppState, error::AppError};

use super::model::{BoundsQuery, VehiclesResponse};

// 获取区域内车辆
pub async fn get_buses(
    State(state): State<AppState>,
    query: Result<Query<BoundsQuery>, QueryRejection>,
) -> Result<Json<VehiclesResponse>, AppError> {
    // 重复参数等无法解析的查询串同样视为无效区域
    let Query(query) = query.map_err(|_| AppError::InvalidBounds)?;
    let bbox = query.to_bbox()?;

    let vehicles = state
        .tracker
        .query(&bbox, &state.limiter, &state.gate)
        .await?;

    let cap_enabled = state.gate.is_enabled();
    Ok(Json(VehiclesResponse {
        vehicles,
        vehicle_count: if cap_enabled {
            state.gate.served_count()
        } else {
            0
        },
        cap_threshold: cap_enabled.then(|| state.gate.threshold()),
        rate_remaining: state.limiter.remaining(),
        rate_limit: state.limiter.max_requests(),
    }))
}
