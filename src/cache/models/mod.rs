/// 缓存数据模型
/// 定义缓存数据的结构体

// 区域车辆缓存模型
pub mod vehicle;

pub mod rate_limit;
pub mod token;

// 重新导出常用类型
pub use rate_limit::RateWindowLog;
pub use token::IssuedToken;
pub use vehicle::CacheEntry;
