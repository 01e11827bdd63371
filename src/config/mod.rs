use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://data.bus-data.dft.gov.uk/api/v1";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 500;
pub const DEFAULT_MAX_REQUESTS_PER_HOUR: u32 = 300;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 3600;
pub const DEFAULT_CAP_CHALLENGE_INTERVAL: u64 = 5000;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,
    pub max_requests_per_hour: u32,
    pub rate_limit_window_secs: u64,
    pub cap_url: String,
    pub cap_key_id: String,
    pub cap_key_secret: String,
    pub cap_challenge_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            max_requests_per_hour: DEFAULT_MAX_REQUESTS_PER_HOUR,
            rate_limit_window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
            cap_url: String::new(),
            cap_key_id: String::new(),
            cap_key_secret: String::new(),
            cap_challenge_interval: DEFAULT_CAP_CHALLENGE_INTERVAL,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，BUS_API_KEY 必填
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        Ok(Config {
            api_key: env::var("BUS_API_KEY")?,
            api_base: env_or("BUS_API_BASE", defaults.api_base),
            server_host: env_or("HOST", defaults.server_host),
            server_port: env_parse("PORT", defaults.server_port),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT", defaults.request_timeout_secs),
            cache_ttl_secs: env_parse("CACHE_TTL", defaults.cache_ttl_secs),
            cache_max_entries: env_parse("CACHE_MAX", defaults.cache_max_entries),
            max_requests_per_hour: env_parse(
                "MAX_REQUESTS_PER_HOUR",
                defaults.max_requests_per_hour,
            ),
            rate_limit_window_secs: env_parse("RATE_LIMIT_WINDOW", defaults.rate_limit_window_secs),
            cap_url: env_or("CAP_URL", defaults.cap_url),
            cap_key_id: env_or("CAP_KEY_ID", defaults.cap_key_id),
            cap_key_secret: env_or("CAP_KEY_SECRET", defaults.cap_key_secret),
            cap_challenge_interval: env_parse(
                "CAP_CHALLENGE_INTERVAL",
                defaults.cap_challenge_interval,
            ),
        })
    }

    /// 配置了 CAP_KEY_ID 才启用人机验证
    pub fn cap_enabled(&self) -> bool {
        !self.cap_key_id.is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        secs_or_default("CACHE_TTL", self.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS)
    }

    pub fn rate_limit_window(&self) -> chrono::Duration {
        secs_or_default(
            "RATE_LIMIT_WINDOW",
            self.rate_limit_window_secs,
            DEFAULT_RATE_LIMIT_WINDOW_SECS,
        )
    }
}

// 超出 chrono 可表示范围的秒数回退到默认值
fn secs_or_default(key: &str, secs: u64, default: u64) -> chrono::Duration {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or_else(|| {
            tracing::warn!("{}={} is out of range, falling back to default", key, secs);
            chrono::Duration::seconds(default as i64)
        })
}

fn env_or(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) if !raw.is_empty() => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {}={}, falling back to default", key, raw);
            default
        }),
        _ => default,
    }
}
