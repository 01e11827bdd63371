use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;

use crate::cache::models::IssuedToken;
use crate::clock::{Clock, system_clock};
use crate::utils::generate_session_token;

/// 会话令牌有效期（秒）
pub const TOKEN_TTL_SECS: i64 = 3600;

/// 会话令牌缓存操作
///
/// 过期令牌只在签发新令牌时顺带清理，两次签发之间表只增不减。
pub struct TokenRegistry {
    tokens: Mutex<HashMap<String, IssuedToken>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::with_clock(Duration::seconds(TOKEN_TTL_SECS), system_clock())
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// 签发令牌
    pub fn issue(&self) -> String {
        let token = generate_session_token();
        let now = self.clock.now();
        let mut tokens = self.tokens.lock();
        tokens.insert(token.clone(), IssuedToken { issued_at: now });
        let before = tokens.len();
        tokens.retain(|_, issued| !issued.is_expired(now, self.ttl));
        if tokens.len() < before {
            tracing::debug!("Swept {} expired session tokens", before - tokens.len());
        }
        token
    }

    /// 校验令牌
    pub fn validate(&self, token: Option<&str>) -> bool {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return false;
        };
        let now = self.clock.now();
        self.tokens
            .lock()
            .get(token)
            .is_some_and(|issued| !issued.is_expired(now, self.ttl))
    }

    /// 删除令牌
    pub fn invalidate(&self, token: &str) {
        self.tokens.lock().remove(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.lock().is_empty()
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}
