//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use thiserror::Error;

/// 翻译错误类型
///
/// 所有错误对触发它的请求都是终结性的：本层不做任何自动重试，
/// 重试策略属于调用方。
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 输入为空或全为空白，在任何引擎交互之前被拦截
    #[error("文本不能为空")]
    EmptyInput,

    /// 翻译引擎进程无法启动
    #[error("无法启动翻译引擎: {0}")]
    ProcessSpawn(String),

    /// 翻译引擎以非零退出码结束，携带捕获的诊断输出
    #[error("翻译引擎异常退出 (exit code {code}): {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    /// 引擎正常退出但输出不是合法的JSON
    #[error("翻译引擎输出无法解析: {0}")]
    MalformedResponse(String),

    /// 引擎返回了格式正确的响应，但自报失败（success=false）
    #[error("翻译失败: {0}")]
    EngineFailure(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl TranslationError {
    /// 检查错误是否值得调用方重试
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::EmptyInput => false,
            TranslationError::ProcessSpawn(_) => true,
            TranslationError::NonZeroExit { .. } => true,
            TranslationError::MalformedResponse(_) => false,
            TranslationError::EngineFailure(_) => true,
            TranslationError::Config(_) => false,
            TranslationError::Serialization(_) => false,
            TranslationError::Internal(_) => false,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::EmptyInput => ErrorSeverity::Info,
            TranslationError::ProcessSpawn(_) => ErrorSeverity::Critical,
            TranslationError::NonZeroExit { .. } => ErrorSeverity::Error,
            TranslationError::MalformedResponse(_) => ErrorSeverity::Error,
            TranslationError::EngineFailure(_) => ErrorSeverity::Warning,
            TranslationError::Config(_) => ErrorSeverity::Critical,
            TranslationError::Serialization(_) => ErrorSeverity::Error,
            TranslationError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::EmptyInput => ErrorCategory::Input,
            TranslationError::ProcessSpawn(_) => ErrorCategory::Process,
            TranslationError::NonZeroExit { .. } => ErrorCategory::Process,
            TranslationError::MalformedResponse(_) => ErrorCategory::Protocol,
            TranslationError::EngineFailure(_) => ErrorCategory::Engine,
            TranslationError::Config(_) => ErrorCategory::Configuration,
            TranslationError::Serialization(_) => ErrorCategory::Serialization,
            TranslationError::Internal(_) => ErrorCategory::Internal,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Input,
    Process,
    Protocol,
    Engine,
    Configuration,
    Serialization,
    Internal,
}

/// 标准错误转换
impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::Internal(format!("IO错误: {}", error))
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::Serialization(format!("JSON序列化错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::Config(format!("TOML解析错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;
    use std::fmt;

    /// 记录并返回错误
    pub fn log_error<T>(error: TranslationError) -> TranslationResult<T> {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("翻译信息: {}", error),
            ErrorSeverity::Warning => tracing::warn!("翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!("翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("翻译严重错误: {}", error),
        }

        Err(error)
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::Config(msg.to_string())
    }

    /// 创建内部错误
    pub fn internal_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::Internal(msg.to_string())
    }
}
