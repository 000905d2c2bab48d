//! 会话模块
//!
//! 会话实体与实时翻译控制器。消息在创作时定格为某个参考语言的原文，
//! 之后永不修改；各语言的译文全部经由翻译缓存附着在消息之外。

pub mod controller;

pub use controller::{ControllerConfig, InteractiveController, RealtimeSnapshot};

use std::sync::Arc;

use crate::translation::storage::{CacheState, TranslationCache};

/// 会话消息
///
/// 不可变的会话实体：`content` 是 `language` 语言下的规范原文。
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    /// 原文的参考语言
    pub language: String,
    pub content: String,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            language: language.into(),
            content: content.into(),
        }
    }
}

/// 会话
///
/// 持有按创作顺序排列的消息与共享的翻译缓存，
/// 显示文本总是从缓存解析而来，消息本身不持有译文。
pub struct Conversation {
    messages: Vec<Message>,
    cache: Arc<TranslationCache>,
}

impl Conversation {
    pub fn new(cache: Arc<TranslationCache>) -> Self {
        Self {
            messages: Vec::new(),
            cache,
        }
    }

    /// 追加一条消息（创作即定格）
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    /// 解析某条消息在目标语言下的显示文本
    ///
    /// 原文即目标语言时直接用原文；有 Ready 缓存用译文；
    /// 其余情况（Pending/Failed/缺失）回退到原文。
    pub fn display_text(&self, id: &str, target_lang: &str) -> Option<String> {
        let message = self.messages.iter().find(|m| m.id == id)?;

        if message.language == target_lang {
            return Some(message.content.clone());
        }

        match self.cache.get(id, target_lang) {
            Some(entry) => match entry.state {
                CacheState::Ready(text) => Some(text),
                _ => Some(message.content.clone()),
            },
            None => Some(message.content.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_resolution() {
        let cache = Arc::new(TranslationCache::new());
        let mut conversation = Conversation::new(Arc::clone(&cache));
        conversation.push(Message::new("m1", "en", "Hello"));

        // 原文即目标语言
        assert_eq!(conversation.display_text("m1", "en").unwrap(), "Hello");

        // 无缓存时回退原文
        assert_eq!(conversation.display_text("m1", "zh-CN").unwrap(), "Hello");

        // Ready 缓存生效
        cache.put_ready("m1", "zh-CN", "你好".to_string());
        assert_eq!(conversation.display_text("m1", "zh-CN").unwrap(), "你好");

        // 未知消息
        assert!(conversation.display_text("m9", "zh-CN").is_none());
    }
}
