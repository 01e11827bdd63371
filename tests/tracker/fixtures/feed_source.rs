// tests/tracker/fixtures/feed_source.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bus_tracker::error::FetchError;
use bus_tracker::feed::FeedSource;
use bus_tracker::models::BoundingBox;
use futures_util::future::BoxFuture;
use parking_lot::Mutex;

#[derive(Debug, Clone)]
pub enum StubResponse {
    Feed(Vec<u8>),
    Timeout,
    Transport,
}

// Stub upstream that counts calls and can be slowed down
pub struct StubFeedSource {
    response: Mutex<StubResponse>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    bboxes: Mutex<Vec<BoundingBox>>,
}

impl StubFeedSource {
    pub fn new(response: StubResponse) -> Arc<Self> {
        Self::with_delay(response, None)
    }

    pub fn with_delay(response: StubResponse, delay: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(response),
            delay,
            calls: AtomicUsize::new(0),
            bboxes: Mutex::new(Vec::new()),
        })
    }

    pub fn set_response(&self, response: StubResponse) {
        *self.response.lock() = response;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_bbox(&self) -> Option<BoundingBox> {
        self.bboxes.lock().last().copied()
    }
}

impl FeedSource for StubFeedSource {
    fn fetch<'a>(&'a self, bbox: &'a BoundingBox) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bboxes.lock().push(*bbox);
        let response = self.response.lock().clone();
        let delay = self.delay;
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match response {
                StubResponse::Feed(bytes) => Ok(bytes),
                StubResponse::Timeout => Err(FetchError::Timeout),
                StubResponse::Transport => Err(FetchError::Transport("connection refused".into())),
            }
        })
    }
}
