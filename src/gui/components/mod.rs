// Dioxus GUI Components Module

pub mod chat_header;
pub mod chat_widget;
pub mod input_section;
pub mod message_list;
pub mod warning_banner;

// Re-exports for convenience
pub use chat_header::ChatHeader;
pub use chat_widget::CineBotWidget;
pub use input_section::InputSection;
pub use message_list::{MessageBubble, MessageList};
pub use warning_banner::WarningBanner;
