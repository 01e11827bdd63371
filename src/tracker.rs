use std::sync::Arc;

use serde::Serialize;

use crate::cache::{BoundingBoxCache, SlidingWindowLimiter};
use crate::captcha::AbuseGate;
use crate::error::{AppError, FetchError};
use crate::feed::{FeedParser, FeedSource};
use crate::models::{BoundingBox, VehicleRecord};

/// 缓存统计
#[derive(Debug, Clone, Serialize)]
pub struct TrackerStats {
    pub cache_entries: usize,
    pub cache_max: usize,
}

/// 车辆查询服务
///
/// 同一区域的并发未命中会各自请求上游，最后写入的结果生效。
pub struct TrackerService {
    source: Arc<dyn FeedSource>,
    cache: Arc<BoundingBoxCache>,
}

impl TrackerService {
    pub fn new(source: Arc<dyn FeedSource>, cache: Arc<BoundingBoxCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &BoundingBoxCache {
        &self.cache
    }

    pub fn stats(&self) -> TrackerStats {
        TrackerStats {
            cache_entries: self.cache.len(),
            cache_max: self.cache.max_entries(),
        }
    }

    /// 查询区域内车辆
    ///
    /// 只有限流拒绝会以错误返回；上游失败按空结果处理并照常写入缓存。
    pub async fn query(
        &self,
        bbox: &BoundingBox,
        limiter: &SlidingWindowLimiter,
        gate: &AbuseGate,
    ) -> Result<Vec<VehicleRecord>, AppError> {
        if let Some(vehicles) = self.cache.get(bbox) {
            return Ok(vehicles);
        }

        if !limiter.admit() {
            tracing::warn!("Upstream rate limit reached");
            return Err(AppError::RateLimitExceeded {
                retry_after: limiter.window().num_seconds().max(0) as u64,
            });
        }

        let vehicles = match self.source.fetch(bbox).await {
            Ok(raw) => {
                let vehicles = FeedParser::parse(&raw);
                tracing::info!("Fetched {} vehicles", vehicles.len());
                vehicles
            }
            Err(FetchError::Timeout) => {
                tracing::warn!("API request timed out");
                Vec::new()
            }
            Err(e) => {
                tracing::error!("API request failed: {}", e);
                Vec::new()
            }
        };

        gate.record_served(vehicles.len());
        self.cache.put(bbox, vehicles.clone());

        Ok(vehicles)
    }
}
