use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use bus_tracker::{
    AppState,
    cache::{BoundingBoxCache, SlidingWindowLimiter},
    captcha::{AbuseGate, CapVerifier, ChallengeVerifier},
    config::Config,
    feed::HttpFeedFetcher,
    router::create_router,
    tracker::TrackerService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("BUS_API_KEY environment variable not set");

    // 上游数据源
    let fetcher = HttpFeedFetcher::new(&config.api_base, &config.api_key, config.request_timeout())
        .expect("Failed to build upstream HTTP client");

    let cache = Arc::new(BoundingBoxCache::new(
        config.cache_ttl(),
        config.cache_max_entries,
    ));
    let tracker = Arc::new(TrackerService::new(Arc::new(fetcher), cache));

    // 设置限流器
    let limiter = Arc::new(SlidingWindowLimiter::new(
        config.max_requests_per_hour,
        config.rate_limit_window(),
    ));

    // 人机验证，未配置 CAP_KEY_ID 时关闭
    let verifier: Option<Arc<dyn ChallengeVerifier>> = if config.cap_enabled() {
        let verifier = CapVerifier::new(&config.cap_url, &config.cap_key_id, &config.cap_key_secret)
            .expect("Failed to build Cap HTTP client");
        tracing::info!("Cap verification enabled via {}", verifier.verify_url());
        Some(Arc::new(verifier) as Arc<dyn ChallengeVerifier>)
    } else {
        tracing::info!("Cap verification disabled");
        None
    };
    let gate = Arc::new(AbuseGate::new(config.cap_challenge_interval, verifier));

    // 设置应用状态
    let state = AppState {
        config: config.clone(),
        tracker,
        limiter,
        gate,
    };

    let router = create_router(state.clone());

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Starting Bus Tracker on http://{}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .await
    .expect("Failed to start server");
}
