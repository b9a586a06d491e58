//! CineBotサーバーのリクエスト/レスポンス形式
//!
//! フィールド名はサーバー側のJSONに合わせてsnake_caseのまま

use serde::{Deserialize, Serialize};

/// `GET /chat/history` の1件分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub message: String,
    pub is_bot: bool,
}

/// `GET /chat/history` のレスポンス（古い順）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// `POST /chat` のリクエストボディ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /chat` のレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_warning: Option<String>,
}

/// `POST /update_watch_time` のリクエストボディ
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchTimeReport {
    pub movie_id: i64,
    pub minutes: i64,
}

/// `POST /update_watch_time` のレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WatchTimeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
