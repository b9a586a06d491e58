//! 視聴時間の定期報告
//!
//! `/watch/<movie_id>` ページでのみ有効。一定間隔で前回報告からの経過分数を
//! サーバーへ送り、警告が返ってきたらウィジェットに表示する。
//! 報告は失敗しても再送しない（その区間の視聴時間は失われる）。

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::api::client::CineBotApi;
use crate::api::models::WatchTimeReport;
use crate::gui::controller::ChatWidgetController;
use crate::gui::models::visible_warning;

/// 報告間隔
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(120);

const WATCH_PATH_PREFIX: &str = "/watch/";

/// ページパスから映画IDを取り出す（最後のセグメント）
pub fn parse_watch_path(path: &str) -> Option<i64> {
    let rest = path.strip_prefix(WATCH_PATH_PREFIX)?;
    rest.rsplit('/').next()?.parse().ok()
}

pub fn is_watch_path(path: &str) -> bool {
    path.starts_with(WATCH_PATH_PREFIX)
}

/// 視聴セッション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchSession {
    pub movie_id: i64,
    /// 前回報告（または開始）時刻
    pub started_at: Instant,
}

impl WatchSession {
    pub fn new(movie_id: i64, started_at: Instant) -> Self {
        Self {
            movie_id,
            started_at,
        }
    }

    /// 基準時刻からの経過分数（切り捨て）
    pub fn whole_minutes_at(&self, now: Instant) -> i64 {
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs() / 60) as i64
    }
}

/// 視聴時間レポーター
pub struct WatchTimeReporter {
    api: Arc<dyn CineBotApi>,
    session: WatchSession,
    widget: Option<ChatWidgetController>,
    interval: Duration,
}

impl WatchTimeReporter {
    pub fn new(api: Arc<dyn CineBotApi>, session: WatchSession) -> Self {
        Self {
            api,
            session,
            widget: None,
            interval: DEFAULT_REPORT_INTERVAL,
        }
    }

    /// 警告の転送先
    pub fn with_widget(mut self, widget: ChatWidgetController) -> Self {
        self.widget = Some(widget);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn session(&self) -> &WatchSession {
        &self.session
    }

    /// 1回分の報告処理
    ///
    /// 1分未満なら何もしない。送信した場合は結果にかかわらず基準時刻を `now` に戻す。
    pub async fn tick(&mut self, now: Instant) -> Option<WatchTimeReport> {
        let minutes = self.session.whole_minutes_at(now);
        if minutes <= 0 {
            debug!(movie_id = self.session.movie_id, "⏱️ Less than a minute watched, skipping report");
            return None;
        }

        let report = WatchTimeReport {
            movie_id: self.session.movie_id,
            minutes,
        };

        match self.api.update_watch_time(report).await {
            Ok(response) => {
                debug!(
                    movie_id = report.movie_id,
                    minutes = report.minutes,
                    success = response.success,
                    "⏱️ Watch time reported"
                );
                if let (true, Some(warning)) = (response.success, visible_warning(response.warning)) {
                    self.forward_warning(warning);
                }
            }
            Err(e) => {
                error!(error = %e, movie_id = report.movie_id, "❌ Failed to update watch time");
            }
        }

        self.session.started_at = now;
        Some(report)
    }

    fn forward_warning(&self, warning: String) {
        match &self.widget {
            Some(widget) => {
                widget.show_watch_warning(warning);
                widget.notify();
            }
            None => {
                info!(warning = %warning, "⏰ Watch warning received without a chat widget");
            }
        }
    }

    /// 報告ループ（最初の報告は1間隔後）
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            movie_id = self.session.movie_id,
            interval_secs = self.interval.as_secs(),
            "🎬 Watch time tracking started"
        );

        loop {
            let now = ticker.tick().await;
            self.tick(now).await;
        }
    }

    /// バックグラウンドで開始。返り値をdropすると停止する
    pub fn spawn(self) -> WatchTimeTask {
        let movie_id = self.session.movie_id;
        WatchTimeTask {
            movie_id,
            handle: tokio::spawn(self.run()),
        }
    }
}

/// 実行中の報告タスク（ページの寿命に紐づく）
#[derive(Debug)]
pub struct WatchTimeTask {
    movie_id: i64,
    handle: JoinHandle<()>,
}

impl WatchTimeTask {
    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }
}

impl Drop for WatchTimeTask {
    fn drop(&mut self) {
        debug!(movie_id = self.movie_id, "🛑 Watch time tracking stopped");
        self.handle.abort();
    }
}
