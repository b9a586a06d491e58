//! メッセージ本文の整形
//!
//! `**太字**` を強調に、改行を `<br>` に変換する。HTML文字列ではなく
//! セグメント列を返し、描画側はテキストノードとして扱う。

use regex::Regex;
use std::sync::OnceLock;

/// 整形済みメッセージの断片
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSegment {
    Text(String),
    Strong(String),
    LineBreak,
}

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    // `.` は改行にマッチしないので太字は行をまたがない
    BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"))
}

/// メッセージ本文をセグメント列に変換
pub fn format_message(text: &str) -> Vec<MessageSegment> {
    let mut segments = Vec::new();

    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            segments.push(MessageSegment::LineBreak);
        }
        push_line_segments(line, &mut segments);
    }

    segments
}

fn push_line_segments(line: &str, segments: &mut Vec<MessageSegment>) {
    let mut cursor = 0;

    for captures in bold_pattern().captures_iter(line) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        if whole.start() > cursor {
            segments.push(MessageSegment::Text(line[cursor..whole.start()].to_string()));
        }
        segments.push(MessageSegment::Strong(inner.as_str().to_string()));
        cursor = whole.end();
    }

    if cursor < line.len() {
        segments.push(MessageSegment::Text(line[cursor..].to_string()));
    }
}
