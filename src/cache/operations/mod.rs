/// 缓存操作
/// 提供缓存操作的功能实现

// 区域车辆缓存
pub mod vehicle;

pub mod rate_limit;
pub mod token;

// 重新导出常用操作
pub use rate_limit::SlidingWindowLimiter;
pub use token::TokenRegistry;
pub use vehicle::BoundingBoxCache;
