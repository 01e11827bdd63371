use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 缺省字段的占位值
pub const UNKNOWN: &str = "Unknown";

/// 单次车辆观测记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vehicle_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub line: String,
    pub operator: String,
    pub destination: String,
    pub timestamp: DateTime<Utc>, // 观测时间，数据源缺省时为解析时间
}

impl VehicleRecord {
    pub fn is_valid_position(latitude: f64, longitude: f64) -> bool {
        latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
    }
}

/// 查询区域（西、南、东、北）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn coords(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    /// 上游 boundingBox 参数
    pub fn to_query_param(&self) -> String {
        self.coords()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
