// GUI用ユーティリティ関数

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::gui::config_manager::{ConfigManager, LogConfig};

/// ログファイル名の接頭辞（日付はtracing-appenderが付ける）
const LOG_FILE_PREFIX: &str = "cinebot.log";

/// 環境変数 `RUST_LOG` を優先し、なければ設定のレベルを使う
fn build_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// ログ初期化
///
/// ファイル出力が有効な場合は返り値のガードを保持しておくこと（dropでフラッシュされる）。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let log_dir = config
        .log_dir
        .clone()
        .or_else(ConfigManager::default_log_dir)
        .filter(|_| config.enable_file_logging);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(build_env_filter(&config.log_level))
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    if guard.is_some() {
        info!("📁 File logging enabled");
    }

    Ok(guard)
}

/// メッセージ本文のプレビュー（ログ用）
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut preview: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        preview.push('…');
    }
    preview
}
