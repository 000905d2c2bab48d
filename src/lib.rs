//! # Transflow Library
//!
//! 面向外部翻译引擎的客户端编排层。翻译引擎是一个黑盒进程（每次调用启动一次，
//! 从标准输入读取 JSON 请求并在退出前向标准输出打印一份 JSON 响应），
//! 本库负责引擎之上的全部编排工作：
//!
//! - 将任意长度的文本在语义边界处切分为引擎可接受的片段
//! - 批量派发片段并按序重组译文
//! - 按（实体, 目标语言）记忆翻译结果，避免重复调用引擎
//! - 对连续输入做防抖，并以序号标记淘汰过期的在途请求
//! - 在切换显示语言时并行补齐整段会话的翻译缓存
//!
//! ## 模块组织
//!
//! - `translation` - 分段、引擎调用、批量编排、缓存与实时会话控制
//! - `web` - HTTP API 服务器（可选）

pub mod translation;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use translation::{
    BatchOrchestrator, TranslationConfig, TranslationError, TranslationOutcome, TranslationResult,
    TranslationService,
};
