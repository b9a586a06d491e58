//! CineBotウィジェットのコントローラー
//!
//! UIフレームワークに依存しない状態管理。Dioxusコンポーネントは
//! `subscribe()` で変更通知を受け取り、`state()` のスナップショットを描画する。
//!
//! - 状態は `RwLock` で保持し、`.await` をまたいでロックを持たない
//! - チャット送信は重複を許可し、最後に送った要求の応答だけを採用する
//! - 警告バナーは世代番号付きのタイマーで自動的に閉じる

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::api::client::CineBotApi;
use crate::gui::utils::preview;
use crate::gui::models::{
    visible_warning, Message, WidgetState, FALLBACK_CONNECTION_REPLY, FALLBACK_FAILURE_REPLY,
};

/// 警告バナーの表示時間
pub const DEFAULT_WARNING_DISPLAY: Duration = Duration::from_secs(10);

struct ControllerInner {
    api: Arc<dyn CineBotApi>,
    state: RwLock<WidgetState>,
    revision: watch::Sender<u64>,
    initialized: AtomicBool,
    /// 最後に発行したチャット要求の番号
    request_seq: AtomicU64,
    /// 警告バナーの世代（古いタイマーが新しい警告を消さないように）
    warning_generation: AtomicU64,
    warning_display: Duration,
}

/// ウィジェットコントローラー
///
/// `Clone` は同じウィジェットへのハンドルを複製する。
#[derive(Clone)]
pub struct ChatWidgetController {
    inner: Arc<ControllerInner>,
}

impl std::fmt::Debug for ChatWidgetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidgetController")
            .field("state", &*self.inner.state.read())
            .field("revision", &*self.inner.revision.borrow())
            .finish()
    }
}

impl PartialEq for ChatWidgetController {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ChatWidgetController {
    pub fn new(api: Arc<dyn CineBotApi>) -> Self {
        Self::with_warning_display(api, DEFAULT_WARNING_DISPLAY)
    }

    pub fn with_warning_display(api: Arc<dyn CineBotApi>, warning_display: Duration) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(ControllerInner {
                api,
                state: RwLock::new(WidgetState::default()),
                revision,
                initialized: AtomicBool::new(false),
                request_seq: AtomicU64::new(0),
                warning_generation: AtomicU64::new(0),
                warning_display,
            }),
        }
    }

    /// 現在の状態のスナップショット
    pub fn state(&self) -> WidgetState {
        self.inner.state.read().clone()
    }

    /// 状態変更の通知を購読
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    fn update<R>(&self, f: impl FnOnce(&mut WidgetState) -> R) -> R {
        let result = {
            let mut state = self.inner.state.write();
            f(&mut state)
        };
        self.inner.revision.send_modify(|revision| *revision += 1);
        result
    }

    /// 初回のみセットアップを行い、履歴を読み込む
    ///
    /// 2回目以降は何もせず `false` を返す。
    pub async fn initialize(&self) -> bool {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            debug!("🤖 CineBot widget already initialized");
            return false;
        }

        info!("🤖 CineBot initialized and ready!");
        self.load_history().await;
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::SeqCst)
    }

    /// ウィンドウの開閉
    pub fn toggle(&self) {
        let is_open = self.update(|state| {
            state.is_open = !state.is_open;
            if state.is_open {
                state.unread = false;
                state.focus_requests += 1;
            }
            state.is_open
        });
        debug!(is_open, "💬 CineBot window toggled");
    }

    /// 入力欄の内容を更新
    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| state.input = text);
    }

    /// 過去の会話を読み込んで挨拶と置き換える
    ///
    /// 失敗しても挨拶を残してログに出すだけ。
    pub async fn load_history(&self) {
        match self.inner.api.chat_history().await {
            Ok(response) if response.success && !response.history.is_empty() => {
                let count = response.history.len();
                let history = response.history.into_iter().map(Message::from).collect();
                self.update(|state| state.replace_greeting(history));
                info!(message_count = count, "📜 Chat history restored");
            }
            Ok(response) => {
                debug!(
                    success = response.success,
                    "📜 No chat history to restore, keeping greeting"
                );
            }
            Err(e) => {
                error!(error = %e, "❌ Failed to load chat history");
            }
        }
    }

    /// 入力欄の内容を送信
    pub async fn submit(&self) {
        let text = self.inner.state.read().input.clone();
        self.send_message(&text).await;
    }

    /// クイックアクション：文言を入力欄に入れてそのまま送信
    pub async fn send_quick_action(&self, message: &str) {
        self.set_input(message);
        self.submit().await;
    }

    /// メッセージを送信してボットの返答を表示する
    ///
    /// 空白のみの入力は無視。失敗時はお詫びメッセージを表示し、呼び出し元にはエラーを返さない。
    pub async fn send_message(&self, text: &str) {
        let message = text.trim();
        if message.is_empty() {
            return;
        }

        let seq = self.inner.request_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, message = %preview(message, 40), "💬 Sending chat message");

        self.update(|state| {
            state.input.clear();
            state.push_message(Message::user(message));
            state.typing = true;
        });

        let result = self.inner.api.send_chat(message).await;

        if self.inner.request_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "⏭️ Discarding superseded chat response");
            return;
        }

        let (reply, warning) = match result {
            Ok(response) if response.success => match response.response {
                Some(reply) => (reply, visible_warning(response.watch_warning)),
                None => {
                    warn!("⚠️ Chat response marked success without a reply");
                    (FALLBACK_FAILURE_REPLY.to_string(), None)
                }
            },
            Ok(_) => (FALLBACK_FAILURE_REPLY.to_string(), None),
            Err(e) => {
                error!(error = %e, "❌ Chat error");
                (FALLBACK_CONNECTION_REPLY.to_string(), None)
            }
        };

        self.update(|state| {
            state.typing = false;
            state.push_message(Message::bot(reply));
            if !state.is_open {
                state.unread = true;
            }
        });

        if let Some(warning) = warning {
            self.show_watch_warning(warning);
        }
    }

    /// 視聴時間警告をバナー表示し、一定時間後に閉じる
    pub fn show_watch_warning(&self, message: impl Into<String>) {
        let message = message.into();
        let generation = self.inner.warning_generation.fetch_add(1, Ordering::SeqCst) + 1;

        info!(warning = %message, "⏰ Showing watch time warning");
        self.update(|state| state.warning = Some(message));

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("⚠️ No async runtime, watch warning will not auto-hide");
            return;
        };

        let controller = self.clone();
        let delay = self.inner.warning_display;
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if controller.inner.warning_generation.load(Ordering::SeqCst) == generation {
                controller.hide_watch_warning();
            }
        });
    }

    /// バナーを閉じる（×ボタンとタイマーから呼ばれる）
    pub fn hide_watch_warning(&self) {
        self.update(|state| state.warning = None);
    }

    /// 閉じている間だけ未読ドットを表示
    pub fn notify(&self) {
        self.update(|state| {
            if !state.is_open {
                state.unread = true;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ChatResponse, HistoryEntry, HistoryResponse};
    use crate::gui::models::TranscriptEntry;
    use crate::gui::test_support::{ChatReply, ScriptedApi};

    fn controller_with(api: ScriptedApi) -> (ChatWidgetController, Arc<ScriptedApi>) {
        let api = Arc::new(api);
        (ChatWidgetController::new(api.clone()), api)
    }

    fn history(entries: &[(&str, bool)]) -> HistoryResponse {
        HistoryResponse {
            success: true,
            history: entries
                .iter()
                .map(|(message, is_bot)| HistoryEntry {
                    message: message.to_string(),
                    is_bot: *is_bot,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_history_replaces_greeting_in_order() {
        let api = ScriptedApi::default().with_history(history(&[
            ("recommend something", false),
            ("Try **Heat**", true),
            ("thanks", false),
        ]));
        let (controller, _) = controller_with(api);

        assert!(controller.initialize().await);

        let state = controller.state();
        assert!(!state.has_greeting());
        assert_eq!(
            state.transcript,
            vec![
                TranscriptEntry::Message(Message::user("recommend something")),
                TranscriptEntry::Message(Message::bot("Try **Heat**")),
                TranscriptEntry::Message(Message::user("thanks")),
            ]
        );
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let api = ScriptedApi::default().with_history(history(&[("hi", false)]));
        let (controller, api) = controller_with(api);

        assert!(controller.initialize().await);
        assert!(!controller.initialize().await);
        assert_eq!(api.history_calls(), 1);
        assert_eq!(controller.state().message_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_history_keeps_greeting() {
        let (controller, _) = controller_with(ScriptedApi::default().with_history(history(&[])));
        controller.load_history().await;
        assert!(controller.state().has_greeting());
    }

    #[tokio::test]
    async fn test_history_failure_keeps_greeting() {
        let (controller, _) = controller_with(ScriptedApi::default());
        controller.load_history().await;
        let state = controller.state();
        assert_eq!(state.transcript, vec![TranscriptEntry::Greeting]);
    }

    #[tokio::test]
    async fn test_unsuccessful_history_keeps_greeting() {
        let mut response = history(&[("hi", false)]);
        response.success = false;
        let (controller, _) = controller_with(ScriptedApi::default().with_history(response));
        controller.load_history().await;
        assert!(controller.state().has_greeting());
    }

    #[tokio::test]
    async fn test_whitespace_input_is_ignored() {
        let (controller, api) = controller_with(ScriptedApi::default());
        let before = controller.state();

        controller.send_message("").await;
        controller.send_message("   \n\t ").await;

        assert!(api.sent_messages().is_empty());
        assert_eq!(controller.state(), before);
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let api = ScriptedApi::default().with_chat_reply(ChatReply::ok("Hello there!"));
        let (controller, api) = controller_with(api);
        controller.set_input("  hello ");

        controller.submit().await;

        let state = controller.state();
        assert_eq!(api.sent_messages(), vec!["hello".to_string()]);
        assert!(state.input.is_empty());
        assert!(!state.typing);
        let messages: Vec<_> = state.messages().cloned().collect();
        assert_eq!(
            messages,
            vec![Message::user("hello"), Message::bot("Hello there!")]
        );
    }

    #[tokio::test]
    async fn test_user_message_is_shown_before_reply() {
        let (api, release) = ScriptedApi::default()
            .with_chat_reply(ChatReply::ok("later"))
            .gated();
        let (controller, _) = controller_with(api);

        let pending = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send_message("hello").await })
        };
        tokio::task::yield_now().await;

        let state = controller.state();
        assert!(state.typing);
        assert_eq!(state.messages().cloned().collect::<Vec<_>>(), vec![Message::user("hello")]);

        release.send(()).unwrap();
        pending.await.unwrap();

        let state = controller.state();
        assert!(!state.typing);
        assert_eq!(state.message_count(), 2);
    }

    #[tokio::test]
    async fn test_connection_failure_appends_apology() {
        let api = ScriptedApi::default().with_chat_reply(ChatReply::NetworkDown);
        let (controller, _) = controller_with(api);

        controller.send_message("hello").await;

        let state = controller.state();
        assert!(!state.typing);
        assert_eq!(
            state.messages().cloned().collect::<Vec<_>>(),
            vec![Message::user("hello"), Message::bot(FALLBACK_CONNECTION_REPLY)]
        );
    }

    #[tokio::test]
    async fn test_unsuccessful_reply_appends_apology() {
        let api = ScriptedApi::default().with_chat_reply(ChatReply::Response(ChatResponse {
            success: false,
            response: None,
            watch_warning: Some("ignored".to_string()),
        }));
        let (controller, _) = controller_with(api);

        controller.send_message("hello").await;

        let state = controller.state();
        assert_eq!(state.message_count(), 2);
        assert_eq!(
            state.messages().last(),
            Some(&Message::bot(FALLBACK_FAILURE_REPLY))
        );
        assert_eq!(state.warning, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_warning_hides_after_ten_seconds() {
        let api = ScriptedApi::default()
            .with_chat_reply(ChatReply::ok_with_warning("Sure!", "You've watched 3 hours today"));
        let (controller, _) = controller_with(api);

        controller.send_message("hello").await;
        assert_eq!(
            controller.state().warning.as_deref(),
            Some("You've watched 3 hours today")
        );

        tokio::time::sleep(Duration::from_millis(9_999)).await;
        assert!(controller.state().warning.is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(controller.state().warning, None);
    }

    #[tokio::test]
    async fn test_empty_watch_warning_shows_no_banner() {
        let api = ScriptedApi::default()
            .with_chat_reply(ChatReply::ok_with_warning("Sure!", ""))
            .with_chat_reply(ChatReply::ok_with_warning("Again!", "   "));
        let (controller, _) = controller_with(api);
        controller.toggle();

        controller.send_message("hello").await;
        controller.send_message("hello again").await;

        let state = controller.state();
        assert_eq!(state.warning, None);
        assert!(!state.unread);
        assert_eq!(state.messages().last(), Some(&Message::bot("Again!")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_warning_restarts_timer() {
        let (controller, _) = controller_with(ScriptedApi::default());

        controller.show_watch_warning("first");
        tokio::time::sleep(Duration::from_secs(6)).await;
        controller.show_watch_warning("second");
        tokio::time::sleep(Duration::from_secs(6)).await;

        assert_eq!(controller.state().warning.as_deref(), Some("second"));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(controller.state().warning, None);
    }

    #[tokio::test]
    async fn test_latest_response_wins() {
        let (api, first_release) = ScriptedApi::default()
            .with_chat_reply(ChatReply::ok("reply to first"))
            .gated();
        let api = api.with_chat_reply(ChatReply::ok("reply to second"));
        let (controller, _) = controller_with(api);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send_message("first").await })
        };
        tokio::task::yield_now().await;

        controller.send_message("second").await;
        assert!(!controller.state().typing);

        first_release.send(()).unwrap();
        first.await.unwrap();

        let texts: Vec<_> = controller
            .state()
            .messages()
            .map(|m| m.text.clone())
            .collect();
        assert_eq!(texts, vec!["first", "second", "reply to second"]);
    }

    #[test]
    fn test_toggle_clears_unread_and_requests_focus() {
        let (controller, _) = controller_with(ScriptedApi::default());

        controller.notify();
        assert!(controller.state().unread);

        controller.toggle();
        let state = controller.state();
        assert!(state.is_open);
        assert!(!state.unread);
        assert_eq!(state.focus_requests, 1);

        controller.toggle();
        let state = controller.state();
        assert!(!state.is_open);
        assert_eq!(state.focus_requests, 1);
    }

    #[test]
    fn test_notify_only_while_closed() {
        let (controller, _) = controller_with(ScriptedApi::default());
        controller.toggle();
        controller.notify();
        assert!(!controller.state().unread);
    }

    #[tokio::test]
    async fn test_reply_while_closed_raises_unread() {
        let api = ScriptedApi::default().with_chat_reply(ChatReply::ok("hi"));
        let (controller, _) = controller_with(api);
        controller.send_message("hello").await;
        assert!(controller.state().unread);
    }

    #[tokio::test]
    async fn test_quick_action_sends_canned_message() {
        let api = ScriptedApi::default().with_chat_reply(ChatReply::ok("Here you go"));
        let (controller, api) = controller_with(api);

        controller.send_quick_action("I feel happy").await;

        assert_eq!(api.sent_messages(), vec!["I feel happy".to_string()]);
        assert!(controller.state().input.is_empty());
    }

    #[tokio::test]
    async fn test_updates_bump_revision() {
        let (controller, _) = controller_with(ScriptedApi::default());
        let mut rx = controller.subscribe();
        let before = controller.revision();

        controller.toggle();

        rx.changed().await.unwrap();
        assert!(controller.revision() > before);
    }
}
