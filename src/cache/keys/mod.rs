/// 缓存键模块
/// 提供各种缓存键生成函数

// 区域缓存键模块
pub mod bbox_keys;

pub use bbox_keys::{BBOX_CACHE_KEY_PRECISION, bbox_cache_key};
