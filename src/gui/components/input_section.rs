use dioxus::prelude::*;
use std::rc::Rc;

use crate::gui::{hooks::ChatWidgetHandle, models::QUICK_ACTIONS, styles::theme::CssClasses};

/// 入力セクションコンポーネント
/// クイックアクションと送信フォーム
#[component]
pub fn InputSection(handle: ChatWidgetHandle) -> Element {
    let state = handle.state;
    let input = state.read().input.clone();
    let focus_requests = state.read().focus_requests;
    let mut input_element = use_signal(|| None::<Rc<MountedData>>);

    // ウィンドウを開いたら入力欄にフォーカス
    use_effect(use_reactive!(|focus_requests| {
        if focus_requests == 0 {
            return;
        }
        if let Some(element) = input_element.read().clone() {
            spawn(async move {
                let _ = element.set_focus(true).await;
            });
        }
    }));

    let form_handle = handle.clone();
    let input_handle = handle.clone();

    rsx! {
        div {
            class: CssClasses::INPUT_AREA,

            div {
                class: CssClasses::QUICK_ACTIONS,
                for (label, message) in QUICK_ACTIONS {
                    QuickActionButton { key: "{label}", handle: handle.clone(), label, message }
                }
            }

            form {
                class: CssClasses::INPUT_FORM,
                onsubmit: move |event: FormEvent| {
                    event.prevent_default();
                    form_handle.submit();
                },

                input {
                    class: CssClasses::INPUT,
                    r#type: "text",
                    placeholder: "Ask me anything...",
                    autocomplete: "off",
                    value: "{input}",
                    onmounted: move |event| input_element.set(Some(event.data())),
                    oninput: move |event| input_handle.set_input(event.value()),
                }
                button {
                    class: CssClasses::SEND,
                    r#type: "submit",
                    aria_label: "Send",
                    "➤"
                }
            }
        }
    }
}

#[component]
fn QuickActionButton(handle: ChatWidgetHandle, label: &'static str, message: &'static str) -> Element {
    rsx! {
        button {
            class: CssClasses::QUICK_ACTION_BTN,
            r#type: "button",
            onclick: move |_| handle.send_quick_action(message),
            "{label}"
        }
    }
}
