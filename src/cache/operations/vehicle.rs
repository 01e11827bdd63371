use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;

use crate::cache::keys::bbox_cache_key;
use crate::cache::models::CacheEntry;
use crate::clock::{Clock, system_clock};
use crate::models::{BoundingBox, VehicleRecord};

/// 区域车辆缓存操作
///
/// 以量化后的区域为键，条目在 `ttl` 内有效；条目数超过 `max_entries` 时
/// 按抓取时间从旧到新淘汰（不是 LRU，读取不会刷新条目）。
pub struct BoundingBoxCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
    clock: Arc<dyn Clock>,
}

impl BoundingBoxCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self::with_clock(ttl, max_entries, system_clock())
    }

    pub fn with_clock(ttl: Duration, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            max_entries,
            clock,
        }
    }

    /// 获取新鲜的缓存记录，过期条目视为未命中但不删除
    pub fn get(&self, bbox: &BoundingBox) -> Option<Vec<VehicleRecord>> {
        let key = bbox_cache_key(bbox);
        let now = self.clock.now();
        let entries = self.entries.lock();
        entries
            .get(&key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.vehicles.clone())
    }

    /// 写入缓存，覆盖同键旧条目后执行淘汰
    pub fn put(&self, bbox: &BoundingBox, vehicles: Vec<VehicleRecord>) {
        let key = bbox_cache_key(bbox);
        let entry = CacheEntry::new(self.clock.now(), vehicles);
        let mut entries = self.entries.lock();
        entries.insert(key, entry);
        Self::evict_if_over_capacity(&mut entries, self.max_entries);
    }

    fn evict_if_over_capacity(entries: &mut HashMap<String, CacheEntry>, max_entries: usize) {
        while entries.len() > max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.captured_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    tracing::debug!("Evicting cache entry {}", key);
                    entries.remove(&key);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }
}
