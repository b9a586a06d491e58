use dioxus::prelude::*;

use crate::gui::styles::theme::CssClasses;

/// チャットヘッダーコンポーネント
///
/// # Props
/// - `on_close`: ×ボタン押下時
#[derive(Props, Clone, PartialEq)]
pub struct ChatHeaderProps {
    pub on_close: EventHandler<()>,
}

#[component]
pub fn ChatHeader(props: ChatHeaderProps) -> Element {
    let ChatHeaderProps { on_close } = props;

    rsx! {
        div {
            class: CssClasses::HEADER,

            div {
                class: CssClasses::HEADER_LEFT,
                div { class: CssClasses::AVATAR, "🤖" }
                div {
                    class: CssClasses::TITLE,
                    h3 { "CineBot" }
                    p { "Your movie companion" }
                }
            }

            button {
                class: CssClasses::CLOSE,
                r#type: "button",
                aria_label: "Close chat",
                onclick: move |_| on_close.call(()),
                "✕"
            }
        }
    }
}
