use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{BoundingBox, VehicleRecord};
use crate::utils::parse_coordinate;

// 区域查询参数，缺省为 0
#[derive(Debug, Default, Deserialize)]
pub struct BoundsQuery {
    pub west: Option<String>,
    pub south: Option<String>,
    pub east: Option<String>,
    pub north: Option<String>,
}

impl BoundsQuery {
    pub fn to_bbox(&self) -> Result<BoundingBox, AppError> {
        let coord =
            |raw: &Option<String>| parse_coordinate(raw.as_deref()).ok_or(AppError::InvalidBounds);
        Ok(BoundingBox::new(
            coord(&self.west)?,
            coord(&self.south)?,
            coord(&self.east)?,
            coord(&self.north)?,
        ))
    }
}

// 车辆查询响应
#[derive(Debug, Serialize)]
pub struct VehiclesResponse {
    pub vehicles: Vec<VehicleRecord>,
    pub vehicle_count: u64,
    pub cap_threshold: Option<u64>,
    pub rate_remaining: u32,
    pub rate_limit: u32,
}
