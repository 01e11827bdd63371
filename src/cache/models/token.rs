use chrono::{DateTime, Duration, Utc};

/// 会话令牌缓存数据模型
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub issued_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.issued_at >= ttl
    }
}
