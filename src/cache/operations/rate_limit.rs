use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;

use crate::cache::models::RateWindowLog;
use crate::clock::{Clock, system_clock};

/// 默认限流窗口（秒）
pub const DEFAULT_WINDOW_SECS: i64 = 3600;

/// 上游请求滑动窗口限流器
///
/// 只记录被放行的请求，被拒绝的尝试不占用额度。
pub struct SlidingWindowLimiter {
    log: Mutex<RateWindowLog>,
    max_requests: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::with_clock(max_requests, window, system_clock())
    }

    pub fn per_hour(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::seconds(DEFAULT_WINDOW_SECS))
    }

    pub fn with_clock(max_requests: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            log: Mutex::new(RateWindowLog::default()),
            max_requests,
            window,
            clock,
        }
    }

    /// 尝试占用一次额度
    pub fn admit(&self) -> bool {
        let now = self.clock.now();
        let mut log = self.log.lock();
        log.prune(now, self.window);
        if log.len() >= self.max_requests as usize {
            return false;
        }
        log.push(now);
        true
    }

    /// 剩余额度，不消耗
    pub fn remaining(&self) -> u32 {
        let now = self.clock.now();
        let mut log = self.log.lock();
        log.prune(now, self.window);
        (self.max_requests as usize).saturating_sub(log.len()) as u32
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
