use config::Config;
use std::sync::Arc;

pub mod cache;
pub mod captcha;
pub mod clock;
pub mod config;
pub mod error;
pub mod feed;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod tracker;
pub mod utils;

use cache::SlidingWindowLimiter;
use captcha::AbuseGate;
use tracker::TrackerService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tracker: Arc<TrackerService>,
    pub limiter: Arc<SlidingWindowLimiter>,
    pub gate: Arc<AbuseGate>,
}
