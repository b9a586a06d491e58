use anyhow::Result;
use cinebot::{
    api::client::{CineBotApi, HttpCineBotApi},
    gui::{bootstrap, components::CineBotWidget, config_manager::ConfigManager, utils, PageContext},
    WidgetSettings,
};
use clap::Parser;
use dioxus::prelude::*;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

/// CineBot デスクトップウィジェット
#[derive(Parser, Debug)]
#[command(name = "cinebot", version, about = "CineBot chat widget and watch-time reporter")]
struct Cli {
    /// CineBotサーバーのURL（設定ファイルより優先）
    #[arg(long)]
    server: Option<String>,

    /// ホストページのパス（例: /watch/42）
    #[arg(long, default_value = "/")]
    path: String,

    /// メインナビゲーションのないページとして扱う（ウィジェット無効）
    #[arg(long)]
    no_nav: bool,

    /// 設定ファイルのパス
    #[arg(long)]
    config: Option<PathBuf>,
}

/// アプリに渡す起動情報
#[derive(Clone)]
struct BootContext {
    page: PageContext,
    api: Arc<dyn CineBotApi>,
    settings: WidgetSettings,
}

fn app() -> Element {
    let boot = use_context::<BootContext>();
    let running = use_hook(|| Rc::new(bootstrap(&boot.page, boot.api.clone(), &boot.settings).start()));

    rsx! {
        div {
            class: "app",
            header {
                if boot.page.has_primary_nav {
                    nav { "{boot.page.path}" }
                }
            }
            if let Some(controller) = running.widget.clone() {
                CineBotWidget { controller }
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let mut config = config_manager.load_or_default();
    if let Some(server) = cli.server {
        config.server_url = server;
    }

    // ファイル出力時はガードをmainの終わりまで保持する
    let _log_guard = utils::init_logging(&config.log)?;

    tracing::info!("🎬 Starting CineBot widget");

    let api: Arc<dyn CineBotApi> = Arc::new(HttpCineBotApi::new(&config.api_config())?);
    let boot = BootContext {
        page: PageContext::new(cli.path, !cli.no_nav),
        api,
        settings: config.widget_settings(),
    };

    // 内部でtokioランタイムが管理されるため、外部でtokio::mainは不要
    LaunchBuilder::desktop().with_context(boot).launch(app);

    tracing::info!("👋 CineBot shutting down");
    Ok(())
}
