//! API通信のエラー型

use thiserror::Error;

/// CineBotサーバーとの通信で発生するエラー
#[derive(Error, Debug)]
pub enum ApiError {
    /// 接続失敗・タイムアウトなど
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 2xx以外のステータス
    #[error("Unexpected HTTP status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// レスポンスJSONの解析失敗
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// ベースURLが不正
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            status,
        }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
