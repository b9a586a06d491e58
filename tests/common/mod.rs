//! 結合テスト用のwarpモックサーバー

#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Filter;

/// 各エンドポイントの応答（ステータス, 本文）
#[derive(Clone)]
pub struct MockResponses {
    pub history: (StatusCode, String),
    pub chat: (StatusCode, String),
    pub watch_time: (StatusCode, String),
}

impl Default for MockResponses {
    fn default() -> Self {
        Self {
            history: (StatusCode::OK, r#"{"success": true, "history": []}"#.to_string()),
            chat: (
                StatusCode::OK,
                r#"{"success": true, "response": "Hello from CineBot"}"#.to_string(),
            ),
            watch_time: (StatusCode::OK, r#"{"success": true}"#.to_string()),
        }
    }
}

/// 受信したリクエスト本文
#[derive(Default)]
pub struct Received {
    pub chat: Vec<Value>,
    pub watch_time: Vec<Value>,
    pub history_calls: usize,
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub received: Arc<Mutex<Received>>,
}

impl MockServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

fn reply(status: StatusCode, body: String) -> warp::reply::Response {
    warp::http::Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// エフェメラルポートでモックサーバーを起動
pub async fn start(responses: MockResponses) -> MockServer {
    let received = Arc::new(Mutex::new(Received::default()));

    let history = {
        let received = received.clone();
        let (status, body) = responses.history.clone();
        warp::path!("chat" / "history").and(warp::get()).map(move || {
            received.lock().history_calls += 1;
            reply(status, body.clone())
        })
    };

    let chat = {
        let received = received.clone();
        let (status, body) = responses.chat.clone();
        warp::path!("chat")
            .and(warp::post())
            .and(warp::body::json())
            .map(move |request: Value| {
                received.lock().chat.push(request);
                reply(status, body.clone())
            })
    };

    let watch_time = {
        let received = received.clone();
        let (status, body) = responses.watch_time.clone();
        warp::path!("update_watch_time")
            .and(warp::post())
            .and(warp::body::json())
            .map(move |request: Value| {
                received.lock().watch_time.push(request);
                reply(status, body.clone())
            })
    };

    let routes = history.or(chat).unify().or(watch_time).unify();
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    MockServer { addr, received }
}
