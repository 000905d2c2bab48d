//! 实时翻译控制器
//!
//! 每个输入框的状态机：`Idle → Debouncing → InFlight → Idle(成功|失败)`。
//!
//! 连续按键只产生一次有效请求：每次按键重启防抖窗口（默认800毫秒），
//! 只有存活到窗口期满的计时器才派发一次编排器调用。引擎调用是一次性的
//! 黑盒进程，没有取消通道，所以"取消"是逻辑上的：每个请求带单调递增的
//! 序号，结算时序号不再是最新的结果直接丢弃，绝不尝试杀掉在途进程。
//!
//! 切换目标语言时对整个消息集做扇出：每个缺少 Ready 缓存的实体各自发起
//! 一次独立的编排器调用，目标语言在派发时以独立参数传入任务，
//! 各自结算只更新自己的（实体, 语言）槽位；单个成员失败不阻塞、
//! 不重试其兄弟成员。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::watch;

use crate::translation::config::{constants, TranslationConfig};
use crate::translation::pipeline::BatchOrchestrator;
use crate::translation::session::Message;
use crate::translation::storage::{CacheState, TranslationCache};

/// 控制器配置
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// 防抖窗口
    pub debounce: Duration,
    /// 实时输入的源语言（通常为 auto）
    pub source_lang: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: constants::DEFAULT_DEBOUNCE,
            source_lang: constants::DEFAULT_SOURCE_LANG.to_string(),
        }
    }
}

impl From<&TranslationConfig> for ControllerConfig {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            debounce: config.debounce(),
            source_lang: config.source_lang.clone(),
        }
    }
}

/// 实时翻译状态快照
///
/// UI 从这里读取当前应显示的译文或失败占位信息；
/// `seq` 是产生该结果的请求序号。
#[derive(Debug, Clone, Default)]
pub struct RealtimeSnapshot {
    pub seq: u64,
    pub translated: Option<String>,
    pub error: Option<String>,
}

/// 实时翻译控制器
pub struct InteractiveController {
    orchestrator: Arc<BatchOrchestrator>,
    cache: Arc<TranslationCache>,
    config: ControllerConfig,
    /// 按键序号，每次输入递增；既重启防抖窗口也标记请求
    input_seq: AtomicU64,
    latest_input: RwLock<String>,
    target_lang: RwLock<String>,
    realtime: RwLock<RealtimeSnapshot>,
    refresh: watch::Sender<u64>,
}

impl InteractiveController {
    /// 创建控制器
    pub fn new(
        orchestrator: Arc<BatchOrchestrator>,
        cache: Arc<TranslationCache>,
        config: ControllerConfig,
        initial_target_lang: &str,
    ) -> Arc<Self> {
        let (refresh, _) = watch::channel(0u64);

        Arc::new(Self {
            orchestrator,
            cache,
            config,
            input_seq: AtomicU64::new(0),
            latest_input: RwLock::new(String::new()),
            target_lang: RwLock::new(initial_target_lang.to_string()),
            realtime: RwLock::new(RealtimeSnapshot::default()),
            refresh,
        })
    }

    /// 订阅UI刷新信号；每次缓存或实时状态变化都会收到一个递增的tick
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.refresh.subscribe()
    }

    /// 当前选中的目标语言
    pub fn target_lang(&self) -> String {
        self.target_lang.read().unwrap().clone()
    }

    /// 当前实时翻译状态
    pub fn realtime_snapshot(&self) -> RealtimeSnapshot {
        self.realtime.read().unwrap().clone()
    }

    /// 共享的翻译缓存
    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    /// 处理一次按键：重启防抖窗口
    ///
    /// 序号递增使所有仍在窗口中的旧计时器失效；窗口期满时序号
    /// 仍是最新的那个计时器派发恰好一次编排器调用。
    pub fn on_input(self: &Arc<Self>, text: &str) {
        let seq = self.input_seq.fetch_add(1, Ordering::SeqCst) + 1;
        *self.latest_input.write().unwrap() = text.to_string();

        let snapshot = text.trim().to_string();
        let this = Arc::clone(self);

        tokio::spawn(async move {
            tokio::time::sleep(this.config.debounce).await;

            // 窗口期内有新按键，本计时器作废
            if this.input_seq.load(Ordering::SeqCst) != seq {
                return;
            }

            if snapshot.is_empty() {
                *this.realtime.write().unwrap() = RealtimeSnapshot {
                    seq,
                    ..Default::default()
                };
                this.notify();
                return;
            }

            let target = this.target_lang();
            let result = this
                .orchestrator
                .translate(&snapshot, &this.config.source_lang, &target)
                .await;

            // 结算时已有更新的输入，丢弃过期结果
            if this.input_seq.load(Ordering::SeqCst) != seq {
                tracing::debug!("丢弃过期的实时翻译结果 (seq {})", seq);
                return;
            }

            let snapshot_state = match result {
                Ok(outcome) => RealtimeSnapshot {
                    seq,
                    translated: Some(outcome.translated_content),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!("实时翻译失败: {}", e);
                    RealtimeSnapshot {
                        seq,
                        translated: None,
                        error: Some(e.to_string()),
                    }
                }
            };

            *this.realtime.write().unwrap() = snapshot_state;
            this.notify();
        });
    }

    /// 查缓存或调度补拉取
    ///
    /// Ready 直接返回译文，不触发引擎调用；缺失或 Failed 时标记
    /// Pending 并调度一次拉取；Pending 表示拉取已在路上。
    pub fn ensure_translation(
        self: &Arc<Self>,
        message: &Message,
        target_lang: &str,
    ) -> Option<String> {
        if let Some(entry) = self.cache.get(&message.id, target_lang) {
            match entry.state {
                CacheState::Ready(text) => return Some(text),
                CacheState::Pending => return None,
                CacheState::Failed(_) => {}
            }
        }

        self.cache.mark_pending(&message.id, target_lang);
        self.spawn_fetch(message, target_lang);
        None
    }

    /// 切换目标语言
    ///
    /// 对每个缺少 Ready 译文的消息并行发起独立拉取；全部成员结算后
    /// 重新派发当前的实时输入（走正常的防抖/淘汰路径）。
    pub async fn change_language(self: &Arc<Self>, messages: &[Message], new_lang: &str) {
        *self.target_lang.write().unwrap() = new_lang.to_string();

        let mut tasks = Vec::new();
        for message in messages {
            // 原文即目标语言，无需翻译
            if message.language == new_lang {
                continue;
            }
            if self.cache.is_ready(&message.id, new_lang) {
                continue;
            }

            self.cache.mark_pending(&message.id, new_lang);
            tasks.push(self.spawn_fetch(message, new_lang));
        }

        if !tasks.is_empty() {
            tracing::info!("切换到 {}: 扇出 {} 个补缓存翻译", new_lang, tasks.len());
        }

        // 等待所有成员结算；失败的成员互不影响
        futures::future::join_all(tasks).await;

        // 实时输入也跟随新语言重新翻译
        let live_input = self.latest_input.read().unwrap().clone();
        if !live_input.trim().is_empty() {
            self.on_input(&live_input);
        }
    }

    // 派发一次独立拉取；目标语言以派发时的值进入任务，
    // 结算只写自己的（实体, 语言）槽位
    fn spawn_fetch(
        self: &Arc<Self>,
        message: &Message,
        target_lang: &str,
    ) -> tokio::task::JoinHandle<()> {
        let this = Arc::clone(self);
        let entity_id = message.id.clone();
        let content = message.content.clone();
        let source = message.language.clone();
        let target = target_lang.to_string();

        tokio::spawn(async move {
            match this.orchestrator.translate(&content, &source, &target).await {
                Ok(outcome) => {
                    this.cache
                        .put_ready(&entity_id, &target, outcome.translated_content);
                }
                Err(e) => {
                    tracing::warn!("实体 {} 翻译到 {} 失败: {}", entity_id, target, e);
                    this.cache.put_failed(&entity_id, &target, e.to_string());
                }
            }
            this.notify();
        })
    }

    fn notify(&self) {
        self.refresh.send_modify(|tick| *tick += 1);
    }
}
