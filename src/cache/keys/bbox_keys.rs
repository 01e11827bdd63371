use crate::models::BoundingBox;

/// 缓存键坐标精度（小数位）
pub const BBOX_CACHE_KEY_PRECISION: usize = 2;

/// 生成区域缓存键
pub fn bbox_cache_key(bbox: &BoundingBox) -> String {
    // 精确到小数点后两位的坐标，相近区域共享同一缓存
    bbox.coords()
        .iter()
        .map(|c| format!("{:.*}", BBOX_CACHE_KEY_PRECISION, c))
        .collect::<Vec<_>>()
        .join(",")
}
