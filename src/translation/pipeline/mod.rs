//! 文本处理管道模块
//!
//! 负责把任意长度的输入变成引擎可消化的调用：
//! `segmenter` 在句子边界切分文本，`batch` 负责派发与重组。

pub mod batch;
pub mod segmenter;

pub use batch::{BatchConfig, BatchOrchestrator, TranslationOutcome};
pub use segmenter::{Segment, Segmenter};
