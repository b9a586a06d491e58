//! ウィジェットの表示用データモデル
//!
//! トランスクリプト、ウィンドウ状態、固定文言をまとめる。

use serde::{Deserialize, Serialize};

use crate::api::models::HistoryEntry;

/// 初期表示の挨拶（ボット発言2段落）
pub const GREETING_LINES: [&str; 2] = [
    "Hi! I'm CineBot, your personal movie guide! 🎬",
    "Ask me to recommend movies, check your watch time, or just chat about films!",
];

/// `success: false` のときのお詫び
pub const FALLBACK_FAILURE_REPLY: &str = "Oops! Something went wrong. Try again?";

/// 通信エラー時のお詫び
pub const FALLBACK_CONNECTION_REPLY: &str =
    "Sorry, I'm having connection issues. Please try again!";

/// ウィジェット用のチャットメッセージ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub is_bot: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bot: false,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bot: true,
        }
    }

    pub fn avatar(&self) -> &'static str {
        if self.is_bot {
            "🤖"
        } else {
            "👤"
        }
    }
}

impl From<HistoryEntry> for Message {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            text: entry.message,
            is_bot: entry.is_bot,
        }
    }
}

/// 表示すべき警告だけを残す（空文字や空白のみは警告なし扱い）
pub fn visible_warning(warning: Option<String>) -> Option<String> {
    warning.filter(|text| !text.trim().is_empty())
}

/// トランスクリプトの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    /// 履歴が届くまで表示するプレースホルダー
    Greeting,
    Message(Message),
}

/// クイックアクション（ラベル, 送信する文言）
pub const QUICK_ACTIONS: [(&str, &str); 4] = [
    ("🎬 Action", "Recommend an action movie"),
    ("😊 Happy mood", "I feel happy"),
    ("💡 Surprise me", "What should I watch?"),
    ("⏱️ Watch time", "How much have I watched today?"),
];

/// ウィジェットの表示状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    pub is_open: bool,
    /// ランチャーの未読ドット
    pub unread: bool,
    /// 「考え中」プレースホルダー
    pub typing: bool,
    /// 入力欄の内容
    pub input: String,
    pub transcript: Vec<TranscriptEntry>,
    /// 表示中の視聴時間警告
    pub warning: Option<String>,
    /// 入力欄へのフォーカス要求回数（ビューは変化を検知してフォーカスする）
    pub focus_requests: u64,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            is_open: false,
            unread: false,
            typing: false,
            input: String::new(),
            transcript: vec![TranscriptEntry::Greeting],
            warning: None,
            focus_requests: 0,
        }
    }
}

impl WidgetState {
    /// 挨拶を除いたメッセージ
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.transcript.iter().filter_map(|entry| match entry {
            TranscriptEntry::Message(message) => Some(message),
            TranscriptEntry::Greeting => None,
        })
    }

    pub fn message_count(&self) -> usize {
        self.messages().count()
    }

    pub fn has_greeting(&self) -> bool {
        self.transcript
            .iter()
            .any(|entry| matches!(entry, TranscriptEntry::Greeting))
    }

    pub fn push_message(&mut self, message: Message) {
        self.transcript.push(TranscriptEntry::Message(message));
    }

    /// 挨拶を履歴で置き換える。挨拶より後ろ（履歴到着前に送った分）はそのまま残す
    pub fn replace_greeting(&mut self, history: Vec<Message>) {
        let Some(position) = self
            .transcript
            .iter()
            .position(|entry| matches!(entry, TranscriptEntry::Greeting))
        else {
            return;
        };

        self.transcript.splice(
            position..=position,
            history.into_iter().map(TranscriptEntry::Message),
        );
    }
}
