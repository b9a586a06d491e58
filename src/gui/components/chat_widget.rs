use dioxus::prelude::*;

use crate::gui::{
    components::{ChatHeader, InputSection, MessageList, WarningBanner},
    controller::ChatWidgetController,
    hooks::use_chat_widget,
    styles::theme::{with_active, CssClasses},
};

/// フローティングチャットウィジェット
///
/// ランチャーボタンと、開閉するチャットウィンドウ。
#[component]
pub fn CineBotWidget(controller: ChatWidgetController) -> Element {
    let handle = use_chat_widget(controller);
    let state = handle.state.read().clone();

    let launcher_handle = handle.clone();
    let close_handle = handle.clone();
    let banner_handle = handle.clone();

    rsx! {
        div {
            class: CssClasses::WIDGET,

            button {
                class: CssClasses::LAUNCHER,
                r#type: "button",
                aria_label: "Open CineBot",
                onclick: move |_| launcher_handle.toggle(),
                "🤖"
                span {
                    class: CssClasses::NOTIFICATION_DOT,
                    hidden: !state.unread,
                }
            }

            div {
                class: with_active(CssClasses::WINDOW, state.is_open),

                ChatHeader {
                    on_close: move |_| close_handle.toggle(),
                }

                WarningBanner {
                    warning: state.warning.clone(),
                    on_dismiss: move |_| banner_handle.dismiss_warning(),
                }

                MessageList {
                    transcript: state.transcript.clone(),
                    typing: state.typing,
                }

                InputSection { handle: handle.clone() }
            }
        }
    }
}
