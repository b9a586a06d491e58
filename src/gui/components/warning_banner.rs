use dioxus::prelude::*;

use crate::gui::styles::theme::{with_active, CssClasses};

/// 視聴時間警告バナー
///
/// 表示時間の管理はコントローラー側。ここでは表示と×ボタンのみ。
#[component]
pub fn WarningBanner(
    #[props(!optional)] warning: Option<String>,
    on_dismiss: EventHandler<()>,
) -> Element {
    let is_visible = warning.is_some();
    let text = warning.unwrap_or_default();

    rsx! {
        div {
            class: with_active(CssClasses::WATCH_WARNING, is_visible),
            role: "alert",
            hidden: !is_visible,

            span { "⏰" }
            span { "{text}" }
            button {
                class: CssClasses::WATCH_WARNING_DISMISS,
                r#type: "button",
                aria_label: "Dismiss warning",
                onclick: move |_| on_dismiss.call(()),
                "✕"
            }
        }
    }
}
