#![allow(dead_code)]

// 集成测试公共模块
//
// 提供脚本化引擎和测试辅助工具

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use transflow::translation::pipeline::{BatchConfig, BatchOrchestrator};
use transflow::translation::session::{ControllerConfig, InteractiveController, Message};
use transflow::translation::storage::TranslationCache;
use transflow::translation::{
    EngineClient, EngineRequest, EngineResponse, SegmentTranslation, TranslationResult,
};

/// 确定性的模拟译文：同样的输入永远产生同样的输出
pub fn mock_translate(text: &str, to: &str) -> String {
    format!("{}#{}", to, text)
}

/// 脚本化引擎
///
/// 不启动任何进程，按固定规则"翻译"并记录收到的每个请求；
/// 可注入引擎自报失败（按文本标记）和人为延迟（模拟慢引擎）。
pub struct ScriptedEngine {
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<EngineRequest>>,
    /// 文本包含该标记时引擎返回 success=false
    pub fail_marker: Option<String>,
    /// 每次调用前等待的时长
    pub delay: Option<Duration>,
    /// auto 请求解析出的源语言
    pub resolved_from: String,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            fail_marker: None,
            delay: None,
            resolved_from: "en".to_string(),
        }
    }

    pub fn with_fail_marker(marker: &str) -> Self {
        let mut engine = Self::new();
        engine.fail_marker = Some(marker.to_string());
        engine
    }

    pub fn with_delay(delay: Duration) -> Self {
        let mut engine = Self::new();
        engine.delay = Some(delay);
        engine
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_requests(&self) -> Vec<EngineRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn should_fail(&self, text: &str) -> bool {
        self.fail_marker
            .as_ref()
            .map(|marker| text.contains(marker))
            .unwrap_or(false)
    }

    fn resolve_from(&self, from: &str) -> String {
        if from == "auto" {
            self.resolved_from.clone()
        } else {
            from.to_string()
        }
    }

    fn failure_response(from: &str, to: &str) -> EngineResponse {
        EngineResponse {
            success: false,
            original: None,
            translated: None,
            results: None,
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            error: Some("模拟引擎故障".to_string()),
        }
    }
}

#[async_trait]
impl EngineClient for ScriptedEngine {
    async fn call(&self, request: EngineRequest) -> TranslationResult<EngineResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match request {
            EngineRequest::Single { text, from, to } => {
                if self.should_fail(&text) {
                    return Ok(Self::failure_response(&from, &to));
                }

                Ok(EngineResponse {
                    success: true,
                    original: Some(text.clone()),
                    translated: Some(mock_translate(&text, &to)),
                    results: None,
                    from: Some(self.resolve_from(&from)),
                    to: Some(to),
                    error: None,
                })
            }
            EngineRequest::Batch { texts, from, to } => {
                if texts.iter().any(|t| self.should_fail(t)) {
                    return Ok(Self::failure_response(&from, &to));
                }

                let results = texts
                    .iter()
                    .map(|t| SegmentTranslation {
                        original: t.clone(),
                        translated: mock_translate(t, &to),
                    })
                    .collect();

                Ok(EngineResponse {
                    success: true,
                    original: None,
                    translated: None,
                    results: Some(results),
                    from: Some(self.resolve_from(&from)),
                    to: Some(to),
                    error: None,
                })
            }
        }
    }
}

/// 用默认批量配置构建编排器
pub fn build_orchestrator(engine: Arc<ScriptedEngine>) -> Arc<BatchOrchestrator> {
    Arc::new(BatchOrchestrator::new(
        engine as Arc<dyn EngineClient>,
        BatchConfig::default(),
    ))
}

/// 构建控制器及其共享缓存
pub fn build_controller(
    engine: Arc<ScriptedEngine>,
    debounce: Duration,
    target_lang: &str,
) -> (Arc<InteractiveController>, Arc<TranslationCache>) {
    let orchestrator = build_orchestrator(engine);
    let cache = Arc::new(TranslationCache::new());
    let config = ControllerConfig {
        debounce,
        source_lang: "auto".to_string(),
    };
    let controller =
        InteractiveController::new(orchestrator, Arc::clone(&cache), config, target_lang);
    (controller, cache)
}

/// 构造一组英文参考语言的会话消息
pub fn make_messages(count: usize) -> Vec<Message> {
    (1..=count)
        .map(|i| {
            Message::new(
                format!("m{}", i),
                "en",
                format!("Message number {}.", i),
            )
        })
        .collect()
}

/// 轮询等待条件成立；配合暂停时钟使用时睡眠会自动推进时间
pub async fn wait_until<F>(condition: F, timeout: Duration) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// 生成超过单次调用阈值的长文本
pub fn long_text() -> String {
    "The quick brown fox jumps over the lazy dog. ".repeat(15)
}
