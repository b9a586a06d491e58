//! ユニットテスト用のスクリプト化API

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::oneshot;

use crate::api::client::CineBotApi;
use crate::api::error::ApiError;
use crate::api::models::*;

/// `send_chat` の応答
#[derive(Debug, Clone)]
pub enum ChatReply {
    Response(ChatResponse),
    NetworkDown,
}

impl ChatReply {
    pub fn ok(text: &str) -> Self {
        Self::Response(ChatResponse {
            success: true,
            response: Some(text.to_string()),
            watch_warning: None,
        })
    }

    pub fn ok_with_warning(text: &str, warning: &str) -> Self {
        Self::Response(ChatResponse {
            success: true,
            response: Some(text.to_string()),
            watch_warning: Some(warning.to_string()),
        })
    }
}

type Gate = Option<oneshot::Receiver<()>>;

/// 事前に登録した応答を順番に返すAPI
#[derive(Default)]
pub struct ScriptedApi {
    history: Mutex<Option<HistoryResponse>>,
    history_calls: Mutex<usize>,
    chat_replies: Mutex<VecDeque<(ChatReply, Gate)>>,
    sent: Mutex<Vec<String>>,
    watch_responses: Mutex<VecDeque<Option<WatchTimeResponse>>>,
    reports: Mutex<Vec<WatchTimeReport>>,
}

impl ScriptedApi {
    pub fn with_history(self, response: HistoryResponse) -> Self {
        *self.history.lock() = Some(response);
        self
    }

    pub fn with_chat_reply(self, reply: ChatReply) -> Self {
        self.chat_replies.lock().push_back((reply, None));
        self
    }

    /// 最後に登録した応答を、返却側の送信まで保留する
    pub fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        if let Some(last) = self.chat_replies.lock().back_mut() {
            last.1 = Some(rx);
        }
        (self, tx)
    }

    /// `None` は通信エラー
    pub fn with_watch_response(self, response: Option<WatchTimeResponse>) -> Self {
        self.watch_responses.lock().push_back(response);
        self
    }

    pub fn history_calls(&self) -> usize {
        *self.history_calls.lock()
    }

    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn reports(&self) -> Vec<WatchTimeReport> {
        self.reports.lock().clone()
    }
}

#[async_trait]
impl CineBotApi for ScriptedApi {
    async fn chat_history(&self) -> Result<HistoryResponse, ApiError> {
        *self.history_calls.lock() += 1;
        self.history
            .lock()
            .clone()
            .ok_or_else(|| ApiError::status("chat/history", 500))
    }

    async fn send_chat(&self, message: &str) -> Result<ChatResponse, ApiError> {
        self.sent.lock().push(message.to_string());
        let next = self.chat_replies.lock().pop_front();
        let Some((reply, gate)) = next else {
            return Err(ApiError::status("chat", 503));
        };

        if let Some(gate) = gate {
            let _ = gate.await;
        }

        match reply {
            ChatReply::Response(response) => Ok(response),
            ChatReply::NetworkDown => Err(ApiError::status("chat", 502)),
        }
    }

    async fn update_watch_time(
        &self,
        report: WatchTimeReport,
    ) -> Result<WatchTimeResponse, ApiError> {
        self.reports.lock().push(report);
        match self.watch_responses.lock().pop_front() {
            Some(Some(response)) => Ok(response),
            Some(None) => Err(ApiError::status("update_watch_time", 502)),
            None => Ok(WatchTimeResponse {
                success: true,
                warning: None,
            }),
        }
    }
}
