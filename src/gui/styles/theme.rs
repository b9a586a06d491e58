//! CSSクラス名とクラス組み立てヘルパー
//!
//! スタイルシート自体はホストページ側が持つ。ここではマークアップが
//! 使うクラス名だけを定義する。

/// CSS クラス名の定数
pub struct CssClasses;

impl CssClasses {
    // ランチャー
    pub const WIDGET: &'static str = "cinebot-widget";
    pub const LAUNCHER: &'static str = "cinebot-button";
    pub const NOTIFICATION_DOT: &'static str = "notification-dot";

    // ウィンドウ
    pub const WINDOW: &'static str = "cinebot-window";
    pub const HEADER: &'static str = "cinebot-header";
    pub const HEADER_LEFT: &'static str = "cinebot-header-left";
    pub const AVATAR: &'static str = "cinebot-avatar";
    pub const TITLE: &'static str = "cinebot-title";
    pub const CLOSE: &'static str = "cinebot-close";

    // 警告バナー
    pub const WATCH_WARNING: &'static str = "watch-warning";
    pub const WATCH_WARNING_DISMISS: &'static str = "watch-warning-dismiss";

    // メッセージ
    pub const MESSAGES: &'static str = "cinebot-messages";
    pub const CHAT_MESSAGE: &'static str = "chat-message";
    pub const MESSAGE_AVATAR: &'static str = "message-avatar";
    pub const MESSAGE_CONTENT: &'static str = "message-content";
    pub const TYPING_INDICATOR: &'static str = "typing-indicator";
    pub const TYPING: &'static str = "cinebot-typing";
    pub const TYPING_DOTS: &'static str = "typing-dots";

    // 入力
    pub const INPUT_AREA: &'static str = "cinebot-input-area";
    pub const QUICK_ACTIONS: &'static str = "cinebot-quick-actions";
    pub const QUICK_ACTION_BTN: &'static str = "quick-action-btn";
    pub const INPUT_FORM: &'static str = "cinebot-input-form";
    pub const INPUT: &'static str = "cinebot-input";
    pub const SEND: &'static str = "cinebot-send";

    // 状態
    pub const ACTIVE: &'static str = "active";
}

/// 表示中なら `active` を付ける
pub fn with_active(base: &str, active: bool) -> String {
    if active {
        format!("{} {}", base, CssClasses::ACTIVE)
    } else {
        base.to_string()
    }
}

/// 送信者に応じたクラス（例: `chat-message bot`）
pub fn sender_class(base: &str, is_bot: bool) -> String {
    format!("{} {}", base, if is_bot { "bot" } else { "user" })
}
