//! 翻译编排模块
//!
//! 提供外部翻译引擎之上的完整编排能力，采用清晰的模块化架构：
//! - **core**: 引擎客户端与统一的翻译服务
//! - **pipeline**: 文本分段与批量派发/重组
//! - **storage**: 按（实体, 目标语言）键控的翻译缓存
//! - **session**: 会话实体与实时翻译控制器（防抖、淘汰、扇出）
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use transflow::translation::TranslationService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TranslationService::create_default("zh-CN", Some("./translate"))?;
//! let outcome = service.translate_text("Hello World", "auto", "zh-CN").await?;
//! println!("{} ({} 个片段)", outcome.translated_content, outcome.segment_count);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// 子模块声明
// ============================================================================

/// 配置管理模块 - 处理翻译相关的所有配置
pub mod config;

/// 核心翻译模块 - 引擎客户端与翻译服务
pub mod core;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 文本处理管道模块 - 分段与批量编排
pub mod pipeline;

/// 会话模块 - 会话实体与实时翻译控制器
pub mod session;

/// 存储管理模块 - 翻译结果缓存
pub mod storage;

// ============================================================================
// 核心API导出
// ============================================================================

pub use self::core::{
    EngineClient, EngineConfig, EngineRequest, EngineResponse, HealthLevel, HealthStatus,
    ProcessEngine, SegmentTranslation, ServiceStats, TranslationService,
};

pub use config::{constants, ConfigManager, TranslationConfig};

pub use error::{ErrorCategory, ErrorSeverity, TranslationError, TranslationResult};

pub use pipeline::{BatchConfig, BatchOrchestrator, Segment, Segmenter, TranslationOutcome};

pub use session::{
    ControllerConfig, Conversation, InteractiveController, Message, RealtimeSnapshot,
};

pub use storage::{CacheEntry, CacheKey, CacheState, CacheStatsSnapshot, TranslationCache};

// ============================================================================
// 便利函数导出
// ============================================================================

/// 用默认配置翻译一段文本
///
/// 内部创建一次性的翻译服务，适合脚本式调用；
/// 需要缓存与实时能力时请直接构建 [`TranslationService`]。
pub async fn translate_text(
    text: &str,
    from: &str,
    to: &str,
) -> TranslationResult<TranslationOutcome> {
    let service = TranslationService::create_default(to, None)?;
    service.translate_text(text, from, to).await
}

/// 检查翻译配置文件是否存在
pub fn config_file_exists() -> bool {
    config::config_file_exists()
}

/// 加载翻译配置（失败时退回默认配置）
pub fn load_translation_config(target_lang: &str, engine_path: Option<&str>) -> TranslationConfig {
    config::load_translation_config(target_lang, engine_path)
}

// ============================================================================
// 模块信息和元数据
// ============================================================================

/// 模块版本信息
pub const VERSION: &str = "0.1.0";
pub const MODULE_NAME: &str = "translation";

/// 运行翻译模块自检
pub async fn self_check() -> TranslationResult<()> {
    tracing::info!("开始翻译模块自检...");

    // 检查配置
    let config = TranslationConfig::default();
    config.validate()?;
    tracing::debug!("✓ 配置正常");

    // 检查分段器
    let segmenter = Segmenter::new(config.max_segment_chars);
    let segments = segmenter.segment("Hello. World!");
    if segments.is_empty() {
        return Err(TranslationError::Internal("分段器异常".to_string()));
    }
    tracing::debug!("✓ 分段器正常");

    // 检查缓存
    let cache = TranslationCache::new();
    cache.put_ready("self-check", "en", "ok".to_string());
    if !cache.is_ready("self-check", "en") {
        return Err(TranslationError::Internal("缓存异常".to_string()));
    }
    tracing::debug!("✓ 缓存正常");

    tracing::info!("翻译模块自检完成，所有组件正常");
    Ok(())
}

/// 模块初始化
pub fn init() {
    tracing::info!("翻译模块 v{} 已加载", VERSION);
}
