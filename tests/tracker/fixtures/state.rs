// tests/tracker/fixtures/state.rs

use std::sync::Arc;

use bus_tracker::AppState;
use bus_tracker::cache::{BoundingBoxCache, SlidingWindowLimiter, TokenRegistry};
use bus_tracker::captcha::{AbuseGate, ChallengeVerifier};
use bus_tracker::clock::ManualClock;
use bus_tracker::config::Config;
use bus_tracker::feed::FeedSource;
use bus_tracker::tracker::TrackerService;
use chrono::Duration;

pub const CACHE_TTL_SECS: i64 = 300;

pub struct TestState {
    pub max_requests: u32,
    pub cache_max: usize,
    pub threshold: u64,
    pub verifier: Option<Arc<dyn ChallengeVerifier>>,
    // Shared by the cache, the limiter and the token registry
    pub clock: ManualClock,
}

impl Default for TestState {
    fn default() -> Self {
        Self {
            max_requests: 300,
            cache_max: 500,
            threshold: 5000,
            verifier: None,
            clock: ManualClock::default(),
        }
    }
}

impl TestState {
    pub fn build(self, source: Arc<dyn FeedSource>) -> AppState {
        let clock = Arc::new(self.clock);
        let cache = Arc::new(BoundingBoxCache::with_clock(
            Duration::seconds(CACHE_TTL_SECS),
            self.cache_max,
            clock.clone(),
        ));
        let limiter =
            SlidingWindowLimiter::with_clock(self.max_requests, Duration::hours(1), clock.clone());
        let registry = TokenRegistry::with_clock(Duration::hours(1), clock);
        AppState {
            config: Config::default(),
            tracker: Arc::new(TrackerService::new(source, cache)),
            limiter: Arc::new(limiter),
            gate: Arc::new(AbuseGate::with_registry(
                registry,
                self.threshold,
                self.verifier,
            )),
        }
    }
}
