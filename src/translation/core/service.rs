//! 翻译服务核心实现
//!
//! 统一的翻译服务入口，把配置、引擎客户端、批量编排器和翻译缓存
//! 装配在一起，并附带性能统计与健康检查。Web 层和实时控制器都从
//! 这里取得装配好的组件。

use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc,
};
use std::time::Instant;

use crate::translation::{
    config::{ConfigManager, TranslationConfig},
    core::engine::{EngineClient, EngineConfig, ProcessEngine},
    error::TranslationResult,
    pipeline::{BatchConfig, BatchOrchestrator, TranslationOutcome},
    storage::TranslationCache,
};

/// 统一的翻译服务
///
/// 所有字段都是线程安全的，服务可以放进 `Arc` 在任务间共享。
pub struct TranslationService {
    config: TranslationConfig,
    /// 保留具体引擎类型以便暴露引擎级统计
    engine: Arc<ProcessEngine>,
    orchestrator: Arc<BatchOrchestrator>,
    cache: Arc<TranslationCache>,
    stats: ServiceStats,
}

impl TranslationService {
    /// 创建新的翻译服务实例
    pub fn new(config: TranslationConfig) -> TranslationResult<Self> {
        config.validate()?;

        let engine = Arc::new(ProcessEngine::new(EngineConfig::from(&config)));
        let orchestrator = Arc::new(BatchOrchestrator::new(
            Arc::clone(&engine) as Arc<dyn EngineClient>,
            BatchConfig::from(&config),
        ));
        let cache = Arc::new(TranslationCache::new());

        Ok(Self {
            config,
            engine,
            orchestrator,
            cache,
            stats: ServiceStats::default(),
        })
    }

    /// 创建使用默认配置的翻译服务
    pub fn create_default(
        target_lang: &str,
        engine_path: Option<&str>,
    ) -> TranslationResult<Self> {
        Self::new(TranslationConfig::default_with_lang(target_lang, engine_path))
    }

    /// 从配置管理器创建（文件 + 环境变量）
    pub fn from_config_manager() -> TranslationResult<Self> {
        let manager = ConfigManager::new()?;
        Self::new(manager.get_config().clone())
    }

    /// 翻译一段文本（智能路径）
    pub async fn translate_text(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> TranslationResult<TranslationOutcome> {
        self.run(self.orchestrator.translate(text, from, to), text)
            .await
    }

    /// 翻译长文本（强制分段批量路径）
    pub async fn translate_long_text(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> TranslationResult<TranslationOutcome> {
        self.run(self.orchestrator.translate_long(text, from, to), text)
            .await
    }

    // 统一的执行与统计记录
    async fn run(
        &self,
        operation: impl std::future::Future<Output = TranslationResult<TranslationOutcome>>,
        text: &str,
    ) -> TranslationResult<TranslationOutcome> {
        let start = Instant::now();
        self.stats.inc_requests();
        self.stats.add_characters_in(text.chars().count());

        let result = operation.await;

        match &result {
            Ok(outcome) => {
                self.stats.inc_completed();
                self.stats
                    .add_characters_out(outcome.translated_content.chars().count());
            }
            Err(e) => {
                self.stats.inc_failures();
                tracing::debug!("翻译请求失败: {}", e);
            }
        }
        self.stats.add_processing_time(start.elapsed());

        result
    }

    /// 当前配置
    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    /// 共享的批量编排器
    pub fn orchestrator(&self) -> Arc<BatchOrchestrator> {
        Arc::clone(&self.orchestrator)
    }

    /// 共享的翻译缓存
    pub fn cache(&self) -> Arc<TranslationCache> {
        Arc::clone(&self.cache)
    }

    /// 引擎客户端（含引擎级统计）
    pub fn engine(&self) -> &Arc<ProcessEngine> {
        &self.engine
    }

    /// 获取服务统计信息
    pub fn get_stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// 获取服务健康状态
    pub fn get_health(&self) -> HealthStatus {
        let mut components = std::collections::HashMap::new();

        // 引擎二进制缺失是最常见的部署错误，启动前就能发现
        let engine_level = if self.engine.binary_path().exists() {
            HealthLevel::Healthy
        } else {
            HealthLevel::Unhealthy
        };
        components.insert("engine".to_string(), engine_level);

        components.insert("cache".to_string(), HealthLevel::Healthy);

        let config_level = if self.config.validate().is_ok() {
            HealthLevel::Healthy
        } else {
            HealthLevel::Unhealthy
        };
        components.insert("config".to_string(), config_level);

        let overall = if components
            .values()
            .all(|&level| level == HealthLevel::Healthy)
        {
            HealthLevel::Healthy
        } else if components
            .values()
            .any(|&level| level == HealthLevel::Unhealthy)
        {
            HealthLevel::Unhealthy
        } else {
            HealthLevel::Degraded
        };

        HealthStatus {
            overall,
            components,
        }
    }
}

/// 翻译服务统计信息（线程安全版本）
#[derive(Debug, Default)]
pub struct ServiceStats {
    /// 收到的翻译请求总数
    pub requests: AtomicUsize,
    /// 成功完成的请求数
    pub completed: AtomicUsize,
    /// 失败的请求数
    pub failures: AtomicUsize,
    /// 输入字符总数
    pub characters_in: AtomicUsize,
    /// 译文字符总数
    pub characters_out: AtomicUsize,
    /// 总处理时间（微秒）
    pub processing_time: AtomicU64,
}

impl ServiceStats {
    pub fn inc_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failures(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_characters_in(&self, count: usize) {
        self.characters_in.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_characters_out(&self, count: usize) {
        self.characters_out.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_processing_time(&self, duration: std::time::Duration) {
        self.processing_time
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// 获取统计数据的一致性快照
    pub fn snapshot(&self) -> ServiceStatsSnapshot {
        ServiceStatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            characters_in: self.characters_in.load(Ordering::Relaxed),
            characters_out: self.characters_out.load(Ordering::Relaxed),
            processing_time: std::time::Duration::from_micros(
                self.processing_time.load(Ordering::Relaxed),
            ),
        }
    }
}

/// 翻译服务统计数据的不可变快照
#[derive(Debug, Clone, Copy)]
pub struct ServiceStatsSnapshot {
    pub requests: usize,
    pub completed: usize,
    pub failures: usize,
    pub characters_in: usize,
    pub characters_out: usize,
    pub processing_time: std::time::Duration,
}

/// 翻译服务的健康状态报告
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub overall: HealthLevel,
    pub components: std::collections::HashMap<String, HealthLevel>,
}

/// 健康状态级别
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthLevel {
    /// 组件运行正常
    Healthy,
    /// 组件功能受限但仍可用
    Degraded,
    /// 组件无法正常工作
    Unhealthy,
}
