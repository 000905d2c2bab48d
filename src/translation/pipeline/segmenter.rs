//! 文本分段器
//!
//! 把长文本在句子边界处切分为有序的、长度受限的片段，供批量翻译使用。
//!
//! ## 切分规则
//!
//! 1. 以句末标点的连续运行（`。！？.!?` 或换行）作为边界，
//!    标点运行归属于它所终结的片段，不会被丢弃
//! 2. 贪心累积：只要 `当前长度 + 下一部分长度 ≤ max_chars` 就继续拼接；
//!    放不下时封存当前块（去除首尾空白后入列），以放不下的那部分开启新块
//! 3. 输入结束时封存最后一个非空块
//! 4. 去除空白后为空的块被丢弃，序号只在幸存块上分配，保持原始相对顺序
//! 5. 单个部分本身超过 `max_chars` 时不再细分，作为超长块原样输出，
//!    句子边界的完整性优先于严格的长度上限
//!
//! 同样的输入和上限总是产生同样的片段序列。

use regex::Regex;

/// 一个有序的文本片段
///
/// `ordinal` 从0开始，定义重组时的拼接顺序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub ordinal: usize,
    pub text: String,
}

/// 句子边界分段器
pub struct Segmenter {
    max_chars: usize,
    boundary: Regex,
}

impl Segmenter {
    /// 创建指定片段上限的分段器
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            boundary: Regex::new(r"[。！？.!?\n]+").unwrap(),
        }
    }

    /// 片段长度上限（按字符计数）
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// 切分文本为有序片段
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for piece in self.split_pieces(trimmed) {
            let piece_len = piece.chars().count();

            if current_len + piece_len <= self.max_chars {
                current.push_str(piece);
                current_len += piece_len;
            } else {
                let sealed = current.trim();
                if !sealed.is_empty() {
                    chunks.push(sealed.to_string());
                }
                current = piece.to_string();
                current_len = piece_len;
            }
        }

        let sealed = current.trim();
        if !sealed.is_empty() {
            chunks.push(sealed.to_string());
        }

        chunks
            .into_iter()
            .enumerate()
            .map(|(ordinal, text)| Segment { ordinal, text })
            .collect()
    }

    /// 按标点运行切分，正文与其终止标点作为相邻部分交替出现
    fn split_pieces<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        let mut last = 0;

        for m in self.boundary.find_iter(text) {
            if m.start() > last {
                pieces.push(&text[last..m.start()]);
            }
            pieces.push(m.as_str());
            last = m.end();
        }

        if last < text.len() {
            pieces.push(&text[last..]);
        }

        pieces
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(crate::translation::config::constants::DEFAULT_MAX_SEGMENT_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 去掉全部空白后逐字符比较，边界空白的归一化不算丢失
    fn strip_whitespace(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_sentence_boundary_split() {
        let segmenter = Segmenter::new(10);
        let segments = segmenter.segment("Hello. World! Bye?");

        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello.", "World!", "Bye?"]);

        let ordinals: Vec<usize> = segments.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn test_punctuation_retained_in_chunk() {
        let segmenter = Segmenter::new(100);
        let segments = segmenter.segment("第一句。第二句！第三句？");

        // 全部放得下时合并为一个块，标点原样保留
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "第一句。第二句！第三句？");
    }

    #[test]
    fn test_greedy_accumulation_respects_cap() {
        let segmenter = Segmenter::new(12);
        let segments = segmenter.segment("One. Two. Three. Four.");

        for segment in &segments {
            assert!(
                segment.text.chars().count() <= 12,
                "片段 {:?} 超过上限",
                segment.text
            );
        }
        assert!(segments.len() >= 2);
    }

    #[test]
    fn test_reconstruction_up_to_whitespace() {
        let segmenter = Segmenter::new(20);
        let source = "How are you? I am fine. Thanks!\nSee you tomorrow.";
        let segments = segmenter.segment(source);

        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(strip_whitespace(&joined), strip_whitespace(source));
    }

    #[test]
    fn test_oversized_piece_not_split() {
        let segmenter = Segmenter::new(5);
        let long_word = "abcdefghij";
        let segments = segmenter.segment(long_word);

        // 没有句子边界可用时宁可超长也不破坏语义
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, long_word);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let segmenter = Segmenter::new(10);
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment("   \n  ").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let segmenter = Segmenter::new(30);
        let source = "Deep learning uses neural networks. It has many layers! Right?";
        assert_eq!(segmenter.segment(source), segmenter.segment(source));
    }

    #[test]
    fn test_mixed_cjk_boundaries() {
        let segmenter = Segmenter::new(8);
        let segments = segmenter.segment("你好世界。今天天气不错！好的。");

        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["你好世界。", "今天天气不错！", "好的。"]);
    }
}
