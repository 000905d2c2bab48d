//! Web 模块的数据类型定义

#[cfg(feature = "web")]
use serde::{Deserialize, Serialize};

use std::sync::Arc;

use crate::translation::{HealthLevel, TranslationOutcome, TranslationService};

/// 应用状态
#[cfg(feature = "web")]
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranslationService>,
}

/// 翻译请求
///
/// `from`/`to` 缺省时分别取 `auto` / `en`。
#[cfg(feature = "web")]
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_to")]
    pub to: String,
}

#[cfg(feature = "web")]
fn default_from() -> String {
    crate::translation::constants::DEFAULT_SOURCE_LANG.to_string()
}

#[cfg(feature = "web")]
fn default_to() -> String {
    crate::translation::constants::DEFAULT_TARGET_LANG.to_string()
}

/// 翻译响应
#[cfg(feature = "web")]
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub original: String,
    pub translated: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "detectedLang", skip_serializing_if = "Option::is_none")]
    pub detected_lang: Option<String>,
    #[serde(rename = "segmentCount")]
    pub segment_count: usize,
}

#[cfg(feature = "web")]
impl From<TranslationOutcome> for TranslateResponse {
    fn from(outcome: TranslationOutcome) -> Self {
        Self {
            success: true,
            original: outcome.original_content,
            translated: outcome.translated_content,
            from: outcome.source_language,
            to: outcome.target_language,
            detected_lang: outcome.detected_language,
            segment_count: outcome.segment_count,
        }
    }
}

/// 错误响应
#[cfg(feature = "web")]
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[cfg(feature = "web")]
impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// 健康检查响应
#[cfg(feature = "web")]
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: std::collections::HashMap<String, String>,
}

#[cfg(feature = "web")]
pub(crate) fn health_level_name(level: HealthLevel) -> &'static str {
    match level {
        HealthLevel::Healthy => "healthy",
        HealthLevel::Degraded => "degraded",
        HealthLevel::Unhealthy => "unhealthy",
    }
}
