use dioxus::prelude::*;
use std::rc::Rc;

use crate::gui::{
    format::{format_message, MessageSegment},
    models::{Message, TranscriptEntry, GREETING_LINES},
    styles::theme::{sender_class, CssClasses},
};

/// メッセージ表示エリア
///
/// トランスクリプトが伸びたら末尾までスクロールする。
#[component]
pub fn MessageList(transcript: Vec<TranscriptEntry>, typing: bool) -> Element {
    let mut bottom = use_signal(|| None::<Rc<MountedData>>);
    let entry_count = transcript.len();

    use_effect(use_reactive!(|(entry_count, typing)| {
        tracing::trace!(entry_count, typing, "📜 Scrolling transcript to bottom");
        if let Some(anchor) = bottom.read().clone() {
            spawn(async move {
                let _ = anchor.scroll_to(ScrollBehavior::Smooth).await;
            });
        }
    }));

    rsx! {
        div {
            class: CssClasses::MESSAGES,

            for (index, entry) in transcript.into_iter().enumerate() {
                {match entry {
                    TranscriptEntry::Greeting => rsx! { GreetingBubble { key: "{index}" } },
                    TranscriptEntry::Message(message) => rsx! {
                        MessageBubble { key: "{index}", message }
                    },
                }}
            }

            if typing {
                TypingIndicator {}
            }

            div {
                onmounted: move |event| bottom.set(Some(event.data())),
            }
        }
    }
}

/// 初期の挨拶
#[component]
fn GreetingBubble() -> Element {
    rsx! {
        div {
            class: CssClasses::CHAT_MESSAGE,
            div { class: sender_class(CssClasses::MESSAGE_AVATAR, true), "🤖" }
            div {
                class: sender_class(CssClasses::MESSAGE_CONTENT, true),
                for line in GREETING_LINES {
                    p { "{line}" }
                }
            }
        }
    }
}

/// 1件分のメッセージ
#[component]
pub fn MessageBubble(message: Message) -> Element {
    let segments = format_message(&message.text);

    rsx! {
        div {
            class: sender_class(CssClasses::CHAT_MESSAGE, message.is_bot),
            div {
                class: sender_class(CssClasses::MESSAGE_AVATAR, message.is_bot),
                "{message.avatar()}"
            }
            div {
                class: sender_class(CssClasses::MESSAGE_CONTENT, message.is_bot),
                p {
                    for segment in segments {
                        {match segment {
                            MessageSegment::Text(text) => rsx! { "{text}" },
                            MessageSegment::Strong(text) => rsx! { strong { "{text}" } },
                            MessageSegment::LineBreak => rsx! { br {} },
                        }}
                    }
                }
            }
        }
    }
}

/// 「考え中」プレースホルダー
#[component]
fn TypingIndicator() -> Element {
    rsx! {
        div {
            class: format!("{} bot {}", CssClasses::CHAT_MESSAGE, CssClasses::TYPING_INDICATOR),
            div { class: sender_class(CssClasses::MESSAGE_AVATAR, true), "🤖" }
            div {
                class: format!("{} {}", CssClasses::TYPING, CssClasses::ACTIVE),
                div {
                    class: CssClasses::TYPING_DOTS,
                    span {}
                    span {}
                    span {}
                }
                span { class: "text-muted", "CineBot is thinking..." }
            }
        }
    }
}
