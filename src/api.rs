pub mod client; // CineBotサーバーとの通信
pub mod error;
pub mod models; // エンドポイントのJSON形式

pub use client::{CineBotApi, HttpCineBotApi};
pub use error::ApiError;
