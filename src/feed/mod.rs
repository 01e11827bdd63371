// 上游车辆数据：HTTP 拉取与 SIRI-VM 解析

pub mod fetcher;
pub mod parser;

pub use fetcher::{FeedSource, HttpFeedFetcher};
pub use parser::{FeedParser, SIRI_NS};
