// Core modules
pub mod config_manager; // 設定管理モジュール
pub mod controller; // ウィジェットの状態管理
pub mod format; // メッセージ本文の整形
pub mod models;
pub mod page; // ホストページとの接続
pub mod utils;
pub mod watch_time; // 視聴時間の定期報告

// Dioxus UI components
pub mod components;
pub mod hooks;
pub mod styles;

#[cfg(test)]
pub(crate) mod test_support;

pub use components::CineBotWidget;
pub use controller::ChatWidgetController;
pub use models::{Message, TranscriptEntry, WidgetState};
pub use page::{bootstrap, CineBotPage, PageContext, RunningPage};
pub use watch_time::{WatchSession, WatchTimeReporter, WatchTimeTask};
