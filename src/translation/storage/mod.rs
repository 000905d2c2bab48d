//! 存储管理模块
//!
//! 提供按（实体, 目标语言）键控的翻译结果缓存。

pub mod cache;

pub use cache::{CacheEntry, CacheKey, CacheState, CacheStatsSnapshot, TranslationCache};
