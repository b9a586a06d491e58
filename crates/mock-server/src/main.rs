//! CineBot開発用モックサーバー
//!
//! `/chat/history`, `/chat`, `/update_watch_time` を固定的な応答で返す。

use clap::Parser;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

#[derive(Parser, Debug)]
#[command(name = "mock-server", about = "Mock CineBot server for local development")]
struct Args {
    /// 待ち受けポート
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// この分数を超えたら視聴時間警告を返す
    #[arg(long, default_value_t = 120)]
    warn_after_minutes: i64,

    /// `/chat` を失敗させる（フォールバック確認用）
    #[arg(long)]
    fail_chat: bool,
}

#[derive(Debug, Clone, Serialize)]
struct HistoryEntry {
    message: String,
    is_bot: bool,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WatchTimeRequest {
    movie_id: i64,
    minutes: i64,
}

#[derive(Default)]
struct MockState {
    history: Vec<HistoryEntry>,
    watched_minutes: HashMap<i64, i64>,
}

impl MockState {
    fn total_minutes(&self) -> i64 {
        self.watched_minutes.values().sum()
    }
}

type SharedState = Arc<Mutex<MockState>>;

const RECOMMENDATIONS: [&str; 4] = [
    "How about **Heat** (1995)? A classic heist thriller.",
    "Try **Spirited Away**, it's a feel-good adventure!",
    "**Mad Max: Fury Road** is pure action.\nBuckle up!",
    "You might enjoy **The Grand Budapest Hotel**.",
];

fn reply_for(message: &str, state: &MockState, warn_after: i64) -> (String, Option<String>) {
    let lower = message.to_lowercase();
    if lower.contains("watch") && (lower.contains("today") || lower.contains("how much")) {
        let total = state.total_minutes();
        let warning = (total > warn_after)
            .then(|| format!("You've watched {} minutes today. Time for a break?", total));
        return (format!("You've watched **{} minutes** so far.", total), warning);
    }

    let reply = RECOMMENDATIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Let's talk movies!");
    (reply.to_string(), None)
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let state: SharedState = Arc::new(Mutex::new(MockState::default()));
    let with_state = {
        let state = state.clone();
        warp::any().map(move || state.clone())
    };

    let history = warp::path!("chat" / "history")
        .and(warp::get())
        .and(with_state.clone())
        .map(|state: SharedState| {
            let history = state.lock().history.clone();
            log::info!("GET /chat/history -> {} messages", history.len());
            warp::reply::json(&serde_json::json!({ "success": true, "history": history }))
        });

    let warn_after = args.warn_after_minutes;
    let fail_chat = args.fail_chat;
    let chat = warp::path!("chat")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state.clone())
        .map(move |request: ChatRequest, state: SharedState| {
            log::info!("POST /chat: {}", request.message);
            if fail_chat {
                return warp::reply::json(&serde_json::json!({ "success": false }));
            }

            let mut state = state.lock();
            let (reply, warning) = reply_for(&request.message, &state, warn_after);
            state.history.push(HistoryEntry {
                message: request.message,
                is_bot: false,
            });
            state.history.push(HistoryEntry {
                message: reply.clone(),
                is_bot: true,
            });

            let mut body = serde_json::json!({ "success": true, "response": reply });
            if let Some(warning) = warning {
                body["watch_warning"] = serde_json::Value::String(warning);
            }
            warp::reply::json(&body)
        });

    let watch_time = warp::path!("update_watch_time")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state)
        .map(move |request: WatchTimeRequest, state: SharedState| {
            let mut state = state.lock();
            *state.watched_minutes.entry(request.movie_id).or_default() += request.minutes;
            let total = state.total_minutes();
            log::info!(
                "POST /update_watch_time movie={} +{}min (total {})",
                request.movie_id,
                request.minutes,
                total
            );

            let mut body = serde_json::json!({ "success": true });
            if total > warn_after {
                body["warning"] = serde_json::Value::String(format!(
                    "You've watched {} minutes today. Consider taking a break!",
                    total
                ));
            }
            warp::reply::json(&body)
        });

    let routes = history.or(chat).or(watch_time).with(warp::log("mock_server"));

    let addr: SocketAddr = ([127, 0, 0, 1], args.port).into();
    log::info!("Mock CineBot server listening on http://{}", addr);
    warp::serve(routes).run(addr).await;
}
