use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

/// 速率限制窗口内的请求记录
#[derive(Debug, Default)]
pub struct RateWindowLog {
    events: VecDeque<DateTime<Utc>>,
}

impl RateWindowLog {
    /// 丢弃窗口之外的记录
    pub fn prune(&mut self, now: DateTime<Utc>, window: Duration) {
        while self.events.front().is_some_and(|&t| now - t >= window) {
            self.events.pop_front();
        }
    }

    pub fn push(&mut self, at: DateTime<Utc>) {
        self.events.push_back(at);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
