use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::Client;

use crate::error::FetchError;
use crate::models::BoundingBox;

const USER_AGENT: &str = concat!("BusTracker/", env!("CARGO_PKG_VERSION"));

/// 车辆数据源
pub trait FeedSource: Send + Sync {
    /// 拉取区域内的原始 SIRI-VM 数据
    fn fetch<'a>(&'a self, bbox: &'a BoundingBox) -> BoxFuture<'a, Result<Vec<u8>, FetchError>>;
}

/// 上游 HTTP 数据源
#[derive(Clone)]
pub struct HttpFeedFetcher {
    client: Client,
    api_base: String,
    api_key: String,
}

impl HttpFeedFetcher {
    pub fn new(api_base: &str, api_key: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn datafeed_url(&self) -> String {
        format!("{}/datafeed", self.api_base)
    }

    async fn fetch_bytes(&self, bbox: &BoundingBox) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(self.datafeed_url())
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("boundingBox", bbox.to_query_param().as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }
}

impl FeedSource for HttpFeedFetcher {
    fn fetch<'a>(&'a self, bbox: &'a BoundingBox) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        Box::pin(self.fetch_bytes(bbox))
    }
}
