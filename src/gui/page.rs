//! ホストページとの接続（コンポジションルート）
//!
//! ページの情報からウィジェットとウォッチタイム報告を有効にするか決め、
//! 両者を結線したハンドルを返す。グローバルなシングルトンは持たない。

use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::client::CineBotApi;
use crate::gui::config_manager::WidgetSettings;
use crate::gui::controller::ChatWidgetController;
use crate::gui::watch_time::{
    is_watch_path, parse_watch_path, WatchSession, WatchTimeReporter, WatchTimeTask,
};

/// ホストページの情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// 現在のパス（例: `/watch/42`）
    pub path: String,
    /// メインナビゲーションがあるか（ログイン済みのアプリページ）
    pub has_primary_nav: bool,
}

impl PageContext {
    pub fn new(path: impl Into<String>, has_primary_nav: bool) -> Self {
        Self {
            path: path.into(),
            has_primary_nav,
        }
    }

    /// 視聴ページなら映画ID
    pub fn watch_movie_id(&self) -> Option<i64> {
        parse_watch_path(&self.path)
    }
}

/// 組み立て済み（未開始）のページ
pub struct CineBotPage {
    pub widget: Option<ChatWidgetController>,
    pub reporter: Option<WatchTimeReporter>,
}

impl CineBotPage {
    /// ウォッチタイム報告を開始する（tokioランタイム上で呼ぶ）
    pub fn start(self) -> RunningPage {
        RunningPage {
            widget: self.widget,
            watch_task: self.reporter.map(WatchTimeReporter::spawn),
        }
    }
}

/// 動作中のページ。dropで報告タスクも止まる
pub struct RunningPage {
    pub widget: Option<ChatWidgetController>,
    pub watch_task: Option<WatchTimeTask>,
}

/// ページに応じてウィジェットとレポーターを組み立てる
pub fn bootstrap(
    page: &PageContext,
    api: Arc<dyn CineBotApi>,
    settings: &WidgetSettings,
) -> CineBotPage {
    let widget = if page.has_primary_nav {
        Some(ChatWidgetController::with_warning_display(
            api.clone(),
            settings.warning_display,
        ))
    } else {
        debug!(path = %page.path, "🚫 No primary navigation, CineBot widget disabled");
        None
    };

    let reporter = if is_watch_path(&page.path) {
        match page.watch_movie_id() {
            Some(movie_id) => {
                let session = WatchSession::new(movie_id, Instant::now());
                let reporter = WatchTimeReporter::new(api, session)
                    .with_interval(settings.report_interval);
                Some(match &widget {
                    Some(widget) => reporter.with_widget(widget.clone()),
                    None => reporter,
                })
            }
            None => {
                warn!(path = %page.path, "⚠️ Watch page without a numeric movie id");
                None
            }
        }
    } else {
        None
    };

    info!(
        path = %page.path,
        widget = widget.is_some(),
        watch_tracking = reporter.is_some(),
        "🎬 CineBot system loaded!"
    );

    CineBotPage { widget, reporter }
}
