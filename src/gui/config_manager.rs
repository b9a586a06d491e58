//! アプリケーション設定管理モジュール
//!
//! XDGディレクトリの `config.toml` を読み書きする。

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::client::ApiClientConfig;

/// ログ設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// ログレベル (trace/debug/info/warn/error)
    pub log_level: String,
    /// カスタムログディレクトリ（Noneの場合はXDGデフォルト使用）
    pub log_dir: Option<PathBuf>,
    /// ファイル出力有効化
    pub enable_file_logging: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
            enable_file_logging: false,
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// CineBotサーバーのURL
    pub server_url: String,
    pub request_timeout_secs: u64,
    /// 視聴時間警告の表示秒数
    pub warning_display_secs: u64,
    /// 視聴時間の報告間隔
    pub watch_report_interval_secs: u64,
    /// ブラウザで確立済みのセッションCookie
    pub session_cookie: Option<String>,

    /// ログ設定
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 10,
            warning_display_secs: 10,
            watch_report_interval_secs: 120,
            session_cookie: None,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn api_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.server_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            session_cookie: self.session_cookie.clone(),
        }
    }

    pub fn widget_settings(&self) -> WidgetSettings {
        WidgetSettings {
            warning_display: Duration::from_secs(self.warning_display_secs),
            // 0秒間隔はtokio::time::intervalがpanicするため下限を設ける
            report_interval: Duration::from_secs(self.watch_report_interval_secs.max(1)),
        }
    }
}

/// ウィジェットとレポーターのタイミング設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetSettings {
    pub warning_display: Duration,
    pub report_interval: Duration,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        AppConfig::default().widget_settings()
    }
}

/// 設定管理マネージャー
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        // 設定ディレクトリを作成（存在しない場合）
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        Ok(Self { config_path })
    }

    /// 任意のパスを使う（テスト・`--config` 用）
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// XDGディレクトリに基づく設定ファイルパスを取得
    fn get_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("dev", "cinebot", "cinebot")
            .context("Failed to get project directories")?;

        let config_file = project_dirs.config_dir().join("config.toml");

        debug!("Config file path: {}", config_file.display());

        Ok(config_file)
    }

    /// XDGデフォルトのログディレクトリ
    pub fn default_log_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "cinebot", "cinebot").map(|dirs| dirs.data_dir().join("logs"))
    }

    /// 設定を読み込み
    pub fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!(
                "Config file not found, using default settings: {}",
                self.config_path.display()
            );
            return Ok(AppConfig::default());
        }

        let config_content = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config: AppConfig = toml::from_str(&config_content).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        info!(
            "✅ Configuration loaded from: {}",
            self.config_path.display()
        );

        Ok(config)
    }

    /// 読み込みに失敗したらデフォルト設定を使う
    pub fn load_or_default(&self) -> AppConfig {
        self.load_config().unwrap_or_else(|e| {
            warn!("⚠️ Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        })
    }

    /// 設定を保存
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let config_content =
            toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, config_content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        info!("💾 Configuration saved to: {}", self.config_path.display());

        Ok(())
    }

    /// 設定ファイルが存在するかチェック
    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }
}
