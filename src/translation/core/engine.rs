//! 翻译引擎客户端
//!
//! 翻译引擎是一个外部可执行程序，采用"一次调用一个进程"的 JSON 协议：
//! 调用方把序列化后的请求写入引擎的标准输入并关闭输入端，
//! 引擎在退出前把完整的响应 JSON 打印到标准输出。
//!
//! ## 调用契约
//!
//! - 成功的定义：进程退出码恰好为 0，且收集到的输出可以解析为合法 JSON
//! - 其余任何结果都是失败：无法启动（[`TranslationError::ProcessSpawn`]）、
//!   非零退出（[`TranslationError::NonZeroExit`]，携带诊断输出）、
//!   退出码为 0 但输出不是 JSON（[`TranslationError::MalformedResponse`]）
//! - 本组件不做任何重试，重试策略属于调用方
//! - 每次调用都是完全隔离的进程生命周期，不存在共享通道，
//!   因此上层可以放心并行派发而无需对通道做同步

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::translation::config::TranslationConfig;
use crate::translation::error::{TranslationError, TranslationResult};

/// 引擎请求
///
/// 两种形态对应引擎协议的两种请求JSON：
/// 单条 `{"text", "from", "to"}` 与批量 `{"texts", "from", "to"}`。
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EngineRequest {
    Single {
        text: String,
        from: String,
        to: String,
    },
    Batch {
        texts: Vec<String>,
        from: String,
        to: String,
    },
}

impl EngineRequest {
    /// 构造单条翻译请求
    pub fn single(text: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        EngineRequest::Single {
            text: text.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// 构造批量翻译请求，texts 的顺序即译文返回顺序
    pub fn batch(
        texts: Vec<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        EngineRequest::Batch {
            texts,
            from: from.into(),
            to: to.into(),
        }
    }
}

/// 批量响应中的单个片段译文
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentTranslation {
    #[serde(default)]
    pub original: String,
    pub translated: String,
}

/// 引擎响应
///
/// 单条与批量共用一个响应结构：单条填充 `translated`，
/// 批量填充 `results`（与提交的 texts 同序同数）。
#[derive(Debug, Clone, Deserialize)]
pub struct EngineResponse {
    pub success: bool,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub translated: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<SegmentTranslation>>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 引擎客户端接口
///
/// 编排层只依赖这个接口，生产实现为 [`ProcessEngine`]；
/// 测试可以注入脚本化的实现。
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// 执行一次完整的请求/响应调用
    async fn call(&self, request: EngineRequest) -> TranslationResult<EngineResponse>;
}

/// 引擎客户端配置
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 引擎可执行文件路径
    pub binary_path: PathBuf,
    /// 启动参数，默认 `-json` 进入JSON协议模式
    pub args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::from(&TranslationConfig::default())
    }
}

impl From<&TranslationConfig> for EngineConfig {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            binary_path: PathBuf::from(&config.engine_path),
            args: config.engine_args.clone(),
        }
    }
}

/// 基于子进程的引擎客户端
///
/// 每次 `call` 启动一个全新的引擎进程：写入请求、关闭stdin、
/// 收集全部输出直到进程退出。进程间互不共享任何状态。
pub struct ProcessEngine {
    config: EngineConfig,
    stats: EngineStats,
}

impl ProcessEngine {
    /// 创建新的引擎客户端
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            stats: EngineStats::default(),
        }
    }

    /// 引擎可执行文件路径
    pub fn binary_path(&self) -> &PathBuf {
        &self.config.binary_path
    }

    /// 获取统计信息
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }
}

#[async_trait]
impl EngineClient for ProcessEngine {
    async fn call(&self, request: EngineRequest) -> TranslationResult<EngineResponse> {
        let payload = serde_json::to_string(&request)?;

        self.stats.inc_invocations();
        self.stats.add_characters_sent(payload.chars().count());

        tracing::debug!(
            "调用翻译引擎: {} ({} 字符)",
            self.config.binary_path.display(),
            payload.chars().count()
        );

        let mut child = Command::new(&self.config.binary_path)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                self.stats.inc_failures();
                TranslationError::ProcessSpawn(format!(
                    "{}: {}",
                    self.config.binary_path.display(),
                    e
                ))
            })?;

        // 写入请求并关闭输入端，引擎读到EOF后开始处理
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TranslationError::Internal("引擎进程缺少stdin管道".to_string()))?;
        stdin.write_all(payload.as_bytes()).await?;
        drop(stdin);

        // 收集全部输出直到进程退出
        let output = child.wait_with_output().await?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            self.stats.inc_failures();
            tracing::warn!("翻译引擎异常退出 (code {}): {}", code, stderr);
            return Err(TranslationError::NonZeroExit { code, stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        self.stats.add_characters_received(stdout.chars().count());

        serde_json::from_str::<EngineResponse>(&stdout).map_err(|e| {
            self.stats.inc_failures();
            TranslationError::MalformedResponse(format!("{}", e))
        })
    }
}

/// 引擎调用统计信息（线程安全版本）
#[derive(Debug, Default)]
pub struct EngineStats {
    /// 发起的引擎调用总数
    pub invocations: AtomicUsize,
    /// 发送给引擎的字符总数
    pub characters_sent: AtomicUsize,
    /// 从引擎接收的字符总数
    pub characters_received: AtomicUsize,
    /// 调用失败次数
    pub failures: AtomicUsize,
}

impl EngineStats {
    pub fn inc_invocations(&self) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_characters_sent(&self, count: usize) {
        self.characters_sent.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_characters_received(&self, count: usize) {
        self.characters_received.fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_failures(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request_wire_shape() {
        let request = EngineRequest::single("Hello", "auto", "zh-CN");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"text":"Hello","from":"auto","to":"zh-CN"}"#);
    }

    #[test]
    fn test_batch_request_wire_shape() {
        let request = EngineRequest::batch(
            vec!["One.".to_string(), "Two.".to_string()],
            "en",
            "ja",
        );
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"texts":["One.","Two."],"from":"en","to":"ja"}"#);
    }

    #[test]
    fn test_response_parsing_single() {
        let json = r#"{"success":true,"original":"Hi","translated":"你好","from":"en","to":"zh-CN"}"#;
        let response: EngineResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.translated.as_deref(), Some("你好"));
        assert_eq!(response.from.as_deref(), Some("en"));
        assert!(response.results.is_none());
    }

    #[test]
    fn test_response_parsing_batch() {
        let json = r#"{"success":true,"results":[{"original":"A","translated":"甲"},{"original":"B","translated":"乙"}],"from":"en","to":"zh-CN"}"#;
        let response: EngineResponse = serde_json::from_str(json).unwrap();
        let results = response.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].translated, "甲");
        assert_eq!(results[1].translated, "乙");
    }

    #[test]
    fn test_response_parsing_engine_failure() {
        let json = r#"{"success":false,"from":"auto","to":"en","error":"unsupported language"}"#;
        let response: EngineResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("unsupported language"));
    }
}
