//! 批量翻译编排器
//!
//! 统一的翻译入口：短文本直接单次调用引擎，长文本先分段、
//! 再用一次批量调用完成全部片段的翻译并按序重组。
//!
//! ## 调用次数契约
//!
//! - 长度 ≤ 阈值（默认500字符）：恰好一次单条引擎调用
//! - 长度 > 阈值：恰好一次批量引擎调用（绝不逐片段调用）；
//!   仅当源语言为 `auto` 时追加一次首片段调用，用于取回检测到的语言标签
//! - 任一调用失败则整个操作失败，不返回部分结果

use std::sync::Arc;

use crate::translation::config::{constants, TranslationConfig};
use crate::translation::core::engine::{EngineClient, EngineRequest, EngineResponse};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::segmenter::Segmenter;

/// 批量编排配置
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// 分段时单个片段的字符上限
    pub max_segment_chars: usize,
    /// 超过该字符数的文本走分段批量路径
    pub single_call_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_segment_chars: constants::DEFAULT_MAX_SEGMENT_CHARS,
            single_call_threshold: constants::DEFAULT_SINGLE_CALL_THRESHOLD,
        }
    }
}

impl From<&TranslationConfig> for BatchConfig {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            max_segment_chars: config.max_segment_chars,
            single_call_threshold: config.single_call_threshold,
        }
    }
}

/// 一次翻译操作的完整结果
///
/// 仅在成功时产生；`segment_count` 随结果一起上报便于观测。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub original_content: String,
    pub translated_content: String,
    /// 引擎解析出的源语言
    pub source_language: String,
    pub target_language: String,
    /// 请求源语言为 `auto` 时检测到的语言标签
    pub detected_language: Option<String>,
    pub segment_count: usize,
}

/// 批量翻译编排器
pub struct BatchOrchestrator {
    engine: Arc<dyn EngineClient>,
    segmenter: Segmenter,
    config: BatchConfig,
}

impl BatchOrchestrator {
    /// 创建新的编排器
    pub fn new(engine: Arc<dyn EngineClient>, config: BatchConfig) -> Self {
        let segmenter = Segmenter::new(config.max_segment_chars);
        Self {
            engine,
            segmenter,
            config,
        }
    }

    /// 智能翻译入口：按长度阈值自动选择单次或批量路径
    pub async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> TranslationResult<TranslationOutcome> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        if trimmed.chars().count() <= self.config.single_call_threshold {
            self.translate_short(trimmed, from, to).await
        } else {
            self.translate_segmented(trimmed, from, to).await
        }
    }

    /// 强制走分段批量路径（对应独立的长文本API入口）
    pub async fn translate_long(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> TranslationResult<TranslationOutcome> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        self.translate_segmented(trimmed, from, to).await
    }

    /// 短文本：一次单条调用，结果原样透传
    async fn translate_short(
        &self,
        trimmed: &str,
        from: &str,
        to: &str,
    ) -> TranslationResult<TranslationOutcome> {
        let response = self
            .engine
            .call(EngineRequest::single(trimmed, from, to))
            .await?;
        let response = ensure_success(response)?;

        let translated = response.translated.clone().unwrap_or_default();
        let resolved_from = response.from.clone().unwrap_or_else(|| from.to_string());

        Ok(TranslationOutcome {
            original_content: trimmed.to_string(),
            translated_content: translated,
            detected_language: if from == constants::AUTO_LANG {
                Some(resolved_from.clone())
            } else {
                None
            },
            source_language: resolved_from,
            target_language: response.to.unwrap_or_else(|| to.to_string()),
            segment_count: 1,
        })
    }

    /// 长文本：分段 → 一次批量调用 → 按序重组
    async fn translate_segmented(
        &self,
        trimmed: &str,
        from: &str,
        to: &str,
    ) -> TranslationResult<TranslationOutcome> {
        let segments = self.segmenter.segment(trimmed);
        if segments.is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        tracing::info!(
            "长文本翻译: {} 字符, 分割成 {} 个片段",
            trimmed.chars().count(),
            segments.len()
        );

        let texts: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
        let response = self
            .engine
            .call(EngineRequest::batch(texts, from, to))
            .await?;
        let response = ensure_success(response)?;

        let results = response.results.clone().unwrap_or_default();
        if results.len() != segments.len() {
            return Err(TranslationError::Internal(format!(
                "翻译结果数量不匹配: 期望 {}, 得到 {}",
                segments.len(),
                results.len()
            )));
        }

        // 按序拼接；片段自带终止标点和空白，不插入分隔符
        let translated: String = results.iter().map(|r| r.translated.as_str()).collect();

        // 源语言为 auto 时，用首片段再调用一次引擎，只为取回检测到的语言标签
        let detected_language = if from == constants::AUTO_LANG {
            Some(self.detect_language(&segments[0].text, from, to).await?)
        } else {
            None
        };

        tracing::info!("长文本翻译完成: {} 字符", translated.chars().count());

        Ok(TranslationOutcome {
            original_content: trimmed.to_string(),
            translated_content: translated,
            source_language: response.from.unwrap_or_else(|| from.to_string()),
            target_language: response.to.unwrap_or_else(|| to.to_string()),
            detected_language,
            segment_count: segments.len(),
        })
    }

    /// 以首片段发起一次单条调用，取其解析出的源语言作为检测结果
    async fn detect_language(
        &self,
        first_segment: &str,
        from: &str,
        to: &str,
    ) -> TranslationResult<String> {
        let response = self
            .engine
            .call(EngineRequest::single(first_segment, from, to))
            .await?;
        let response = ensure_success(response)?;

        Ok(response.from.unwrap_or_else(|| from.to_string()))
    }
}

/// 协议层成功但引擎自报失败时，转换为携带引擎消息的错误
fn ensure_success(response: EngineResponse) -> TranslationResult<EngineResponse> {
    if response.success {
        Ok(response)
    } else {
        Err(TranslationError::EngineFailure(
            response.error.unwrap_or_else(|| "翻译失败".to_string()),
        ))
    }
}
