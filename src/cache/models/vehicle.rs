use chrono::{DateTime, Duration, Utc};

use crate::models::VehicleRecord;

/// 区域车辆缓存条目
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub captured_at: DateTime<Utc>,
    pub vehicles: Vec<VehicleRecord>,
}

impl CacheEntry {
    pub fn new(captured_at: DateTime<Utc>, vehicles: Vec<VehicleRecord>) -> Self {
        Self {
            captured_at,
            vehicles,
        }
    }

    /// 条目年龄严格小于 ttl 时视为新鲜
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.captured_at < ttl
    }
}
