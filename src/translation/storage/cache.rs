//! 翻译缓存模块
//!
//! 按（实体, 目标语言）键控的翻译结果存储。实体的原文是不可变的，
//! 译文只存在于这里；同一键的并发写入以最后完成者为准（last-write-wins），
//! 不同键落在不相交的槽位上，无需跨槽协调。
//!
//! 不做淘汰：条目随所属实体存活，会话规模的实体集不会无界增长。

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use dashmap::DashMap;

/// 缓存键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub entity_id: String,
    pub target_lang: String,
}

impl CacheKey {
    pub fn new(entity_id: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            target_lang: target_lang.into(),
        }
    }
}

/// 缓存条目状态
///
/// 每个（实体, 语言）对的状态迁移为 Pending → Ready 或 Pending → Failed，
/// 除非显式重试。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    /// 拉取已调度，结果未到
    Pending,
    /// 翻译完成
    Ready(String),
    /// 拉取失败，携带错误消息
    Failed(String),
}

/// 缓存条目
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub state: CacheState,
    pub updated_at: Instant,
}

impl CacheEntry {
    fn new(state: CacheState) -> Self {
        Self {
            state,
            updated_at: Instant::now(),
        }
    }

    /// 条目是否处于就绪状态
    pub fn is_ready(&self) -> bool {
        matches!(self.state, CacheState::Ready(_))
    }
}

/// 缓存统计信息
#[derive(Debug, Default)]
pub struct CacheStats {
    pub lookups: AtomicU64,
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub writes: AtomicU64,
}

/// 缓存统计快照
#[derive(Debug, Clone, Copy)]
pub struct CacheStatsSnapshot {
    pub lookups: u64,
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub entries: usize,
}

/// 翻译缓存
pub struct TranslationCache {
    entries: DashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
}

impl TranslationCache {
    /// 创建空缓存
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// 获取条目快照
    pub fn get(&self, entity_id: &str, target_lang: &str) -> Option<CacheEntry> {
        self.stats.lookups.fetch_add(1, Ordering::Relaxed);

        let key = CacheKey::new(entity_id, target_lang);
        match self.entries.get(&key) {
            Some(entry) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.clone())
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// 该键是否已有就绪译文
    pub fn is_ready(&self, entity_id: &str, target_lang: &str) -> bool {
        let key = CacheKey::new(entity_id, target_lang);
        self.entries
            .get(&key)
            .map(|entry| entry.is_ready())
            .unwrap_or(false)
    }

    /// 该键是否需要调度一次拉取
    ///
    /// 缺失或 Failed 需要拉取；Pending 表示拉取已在路上；Ready 无需动作。
    pub fn needs_fetch(&self, entity_id: &str, target_lang: &str) -> bool {
        let key = CacheKey::new(entity_id, target_lang);
        match self.entries.get(&key) {
            None => true,
            Some(entry) => matches!(entry.state, CacheState::Failed(_)),
        }
    }

    /// 标记拉取进行中
    pub fn mark_pending(&self, entity_id: &str, target_lang: &str) {
        self.insert(entity_id, target_lang, CacheState::Pending);
    }

    /// 写入就绪译文
    pub fn put_ready(&self, entity_id: &str, target_lang: &str, translated: String) {
        self.insert(entity_id, target_lang, CacheState::Ready(translated));
    }

    /// 写入失败状态
    pub fn put_failed(&self, entity_id: &str, target_lang: &str, message: String) {
        self.insert(entity_id, target_lang, CacheState::Failed(message));
    }

    // 统一写入口；覆盖即最后写入者胜出
    fn insert(&self, entity_id: &str, target_lang: &str, state: CacheState) {
        self.stats.writes.fetch_add(1, Ordering::Relaxed);
        self.entries
            .insert(CacheKey::new(entity_id, target_lang), CacheEntry::new(state));
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空缓存
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// 获取统计快照
    pub fn stats_snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            lookups: self.stats.lookups.load(Ordering::Relaxed),
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            writes: self.stats.writes.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_basic_operations() {
        let cache = TranslationCache::new();

        assert!(cache.get("m1", "zh-CN").is_none());

        cache.put_ready("m1", "zh-CN", "你好".to_string());
        let entry = cache.get("m1", "zh-CN").unwrap();
        assert_eq!(entry.state, CacheState::Ready("你好".to_string()));
        assert_eq!(cache.len(), 1);

        // 同一实体的另一个语言是独立槽位
        cache.put_ready("m1", "ja", "こんにちは".to_string());
        assert_eq!(cache.len(), 2);
        assert!(cache.is_ready("m1", "ja"));
        assert!(!cache.is_ready("m2", "zh-CN"));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_state_transitions() {
        let cache = TranslationCache::new();

        cache.mark_pending("m1", "fr");
        assert_eq!(cache.get("m1", "fr").unwrap().state, CacheState::Pending);

        cache.put_failed("m1", "fr", "引擎不可用".to_string());
        assert_eq!(
            cache.get("m1", "fr").unwrap().state,
            CacheState::Failed("引擎不可用".to_string())
        );

        // 失败后可重试：重新 Pending → Ready
        cache.mark_pending("m1", "fr");
        cache.put_ready("m1", "fr", "Bonjour".to_string());
        assert!(cache.is_ready("m1", "fr"));
    }

    #[test]
    fn test_needs_fetch_policy() {
        let cache = TranslationCache::new();

        // 缺失 → 需要拉取
        assert!(cache.needs_fetch("m1", "de"));

        // Pending → 拉取已在路上
        cache.mark_pending("m1", "de");
        assert!(!cache.needs_fetch("m1", "de"));

        // Ready → 无需动作
        cache.put_ready("m1", "de", "Hallo".to_string());
        assert!(!cache.needs_fetch("m1", "de"));

        // Failed → 需要重新拉取
        cache.put_failed("m1", "de", "boom".to_string());
        assert!(cache.needs_fetch("m1", "de"));
    }

    #[test]
    fn test_last_write_wins() {
        let cache = TranslationCache::new();

        cache.put_ready("m1", "zh-CN", "旧译文".to_string());
        cache.put_ready("m1", "zh-CN", "新译文".to_string());

        assert_eq!(
            cache.get("m1", "zh-CN").unwrap().state,
            CacheState::Ready("新译文".to_string())
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_stats() {
        let cache = TranslationCache::new();

        cache.put_ready("m1", "en", "hello".to_string());
        cache.get("m1", "en");
        cache.get("m2", "en");

        let stats = cache.stats_snapshot();
        assert_eq!(stats.lookups, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.entries, 1);
    }
}
