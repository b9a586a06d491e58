pub mod use_chat_widget;

pub use use_chat_widget::{use_chat_widget, ChatWidgetHandle};
