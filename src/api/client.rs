//! CineBotサーバーAPIクライアント
//!
//! ウィジェットとウォッチタイム報告はこのトレイト越しにサーバーへアクセスする。
//! テストではスクリプト化した実装に差し替える。

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::error::ApiError;
use crate::api::models::*;

pub const HISTORY_ENDPOINT: &str = "chat/history";
pub const CHAT_ENDPOINT: &str = "chat";
pub const WATCH_TIME_ENDPOINT: &str = "update_watch_time";

/// CineBotサーバーの抽象インタフェース
#[async_trait]
pub trait CineBotApi: Send + Sync {
    /// 過去の会話を取得（古い順）
    async fn chat_history(&self) -> Result<HistoryResponse, ApiError>;

    /// メッセージを送信してボットの返答を得る
    async fn send_chat(&self, message: &str) -> Result<ChatResponse, ApiError>;

    /// 視聴時間を報告
    async fn update_watch_time(&self, report: WatchTimeReport)
        -> Result<WatchTimeResponse, ApiError>;
}

/// HTTPクライアント設定
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// ホストページで確立済みのセッションCookie（そのまま転送する）
    pub session_cookie: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout: Duration::from_secs(10),
            session_cookie: None,
        }
    }
}

/// reqwestによる実装
#[derive(Debug, Clone)]
pub struct HttpCineBotApi {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpCineBotApi {
    pub fn new(config: &ApiClientConfig) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ApiError::invalid_url(&config.base_url, format!("bad cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        tracing::debug!(base_url = %base_url, "🌐 CineBot API client created");

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::invalid_url(self.base_url.as_str(), e.to_string()))
    }
}

#[async_trait]
impl CineBotApi for HttpCineBotApi {
    async fn chat_history(&self) -> Result<HistoryResponse, ApiError> {
        let url = self.endpoint(HISTORY_ENDPOINT)?;
        tracing::debug!(url = %url, "📡 GET chat history");
        let response = self.http_client.get(url).send().await?;
        decode_response(HISTORY_ENDPOINT, response).await
    }

    async fn send_chat(&self, message: &str) -> Result<ChatResponse, ApiError> {
        let url = self.endpoint(CHAT_ENDPOINT)?;
        tracing::debug!(url = %url, message_length = message.len(), "📡 POST chat");
        let body = ChatRequest {
            message: message.to_string(),
        };
        let response = self.http_client.post(url).json(&body).send().await?;
        decode_response(CHAT_ENDPOINT, response).await
    }

    async fn update_watch_time(
        &self,
        report: WatchTimeReport,
    ) -> Result<WatchTimeResponse, ApiError> {
        let url = self.endpoint(WATCH_TIME_ENDPOINT)?;
        tracing::debug!(
            url = %url,
            movie_id = report.movie_id,
            minutes = report.minutes,
            "📡 POST watch time"
        );
        let response = self.http_client.post(url).json(&report).send().await?;
        decode_response(WATCH_TIME_ENDPOINT, response).await
    }
}

/// 末尾に `/` を付けて相対パスでjoinできるようにする
fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash).map_err(|e| ApiError::invalid_url(raw, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::invalid_url(
            raw,
            format!("unsupported scheme '{}'", other),
        )),
    }
}

async fn decode_response<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::status(endpoint, status.as_u16()));
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}
