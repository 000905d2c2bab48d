//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{TranslationError, TranslationResult};

/// 翻译编排层配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationConfig {
    // 引擎配置
    pub engine_path: String,
    pub engine_args: Vec<String>,

    // 语言配置
    pub source_lang: String,
    pub target_lang: String,

    // 分段与批量配置
    pub max_segment_chars: usize,
    pub single_call_threshold: usize,

    // 实时翻译配置
    pub debounce_ms: u64,
}

impl TranslationConfig {
    /// 创建带指定语言的默认配置
    pub fn default_with_lang(target_lang: &str, engine_path: Option<&str>) -> Self {
        let mut config = Self::default();
        config.target_lang = target_lang.to_string();
        if let Some(path) = engine_path {
            config.engine_path = path.to_string();
        }
        config
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.engine_path.trim().is_empty() {
            return Err(TranslationError::Config(
                "引擎路径不能为空".to_string(),
            ));
        }

        if self.max_segment_chars == 0 {
            return Err(TranslationError::Config(
                "片段最大长度不能为0".to_string(),
            ));
        }

        if self.single_call_threshold == 0 {
            return Err(TranslationError::Config(
                "单次调用阈值不能为0".to_string(),
            ));
        }

        if self.target_lang.trim().is_empty() || self.source_lang.trim().is_empty() {
            return Err(TranslationError::Config(
                "语言代码不能为空".to_string(),
            ));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("TRANSFLOW_ENGINE_PATH") {
            tracing::info!("环境变量覆盖引擎路径: {}", path);
            self.engine_path = path;
        }

        if let Ok(args) = std::env::var("TRANSFLOW_ENGINE_ARGS") {
            self.engine_args = args
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(lang) = std::env::var("TRANSFLOW_SOURCE_LANG") {
            self.source_lang = lang;
        }

        if let Ok(lang) = std::env::var("TRANSFLOW_TARGET_LANG") {
            self.target_lang = lang;
        }

        if let Ok(value) = std::env::var("TRANSFLOW_MAX_SEGMENT_CHARS") {
            if let Ok(chars) = value.parse() {
                self.max_segment_chars = chars;
            }
        }

        if let Ok(value) = std::env::var("TRANSFLOW_SINGLE_CALL_THRESHOLD") {
            if let Ok(threshold) = value.parse() {
                self.single_call_threshold = threshold;
            }
        }

        if let Ok(value) = std::env::var("TRANSFLOW_DEBOUNCE_MS") {
            if let Ok(ms) = value.parse() {
                self.debounce_ms = ms;
            }
        }
    }

    /// 转换为Duration类型
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            engine_path: constants::DEFAULT_ENGINE_PATH.to_string(),
            engine_args: constants::DEFAULT_ENGINE_ARGS
                .iter()
                .map(|s| s.to_string())
                .collect(),

            source_lang: constants::DEFAULT_SOURCE_LANG.to_string(),
            target_lang: constants::DEFAULT_TARGET_LANG.to_string(),

            max_segment_chars: constants::DEFAULT_MAX_SEGMENT_CHARS,
            single_call_threshold: constants::DEFAULT_SINGLE_CALL_THRESHOLD,

            debounce_ms: constants::DEFAULT_DEBOUNCE.as_millis() as u64,
        }
    }
}

/// 简化的配置管理器
pub struct ConfigManager {
    config: TranslationConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new() -> TranslationResult<Self> {
        let mut config = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 获取配置
    pub fn get_config(&self) -> &TranslationConfig {
        &self.config
    }

    /// 基于当前配置派生目标语言/引擎路径变体
    pub fn create_simple_config(
        &self,
        target_lang: &str,
        engine_path: Option<&str>,
    ) -> TranslationConfig {
        let mut config = self.config.clone();
        config.target_lang = target_lang.to_string();
        if let Some(path) = engine_path {
            config.engine_path = path.to_string();
        }
        config
    }

    /// 从文件加载配置
    fn load_config() -> TranslationResult<TranslationConfig> {
        // 首先尝试加载 .env 文件
        Self::load_dotenv();

        // 查找配置文件
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslationConfig::default())
    }

    /// 从指定文件加载配置
    fn load_from_file(path: &str) -> TranslationResult<TranslationConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::Config(format!("读取配置文件失败: {}", e)))?;

        // 尝试TOML格式
        if path.ends_with(".toml") {
            toml::from_str(&content)
                .map_err(|e| TranslationError::Config(format!("解析TOML配置失败: {}", e)))
        } else {
            // 尝试JSON格式
            serde_json::from_str(&content)
                .map_err(|e| TranslationError::Config(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env.development", ".env.production", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() {
                if dotenv::from_filename(env_file).is_ok() {
                    tracing::info!("已加载环境变量文件: {}", env_file);
                    break;
                }
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let config = TranslationConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| TranslationError::Config(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslationError::Config(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}
