//! CineBotウィジェット用カスタムフック
//!
//! コントローラーの変更通知をSignalに橋渡しし、UIイベントを
//! コントローラーの非同期処理として起動する。

use dioxus::prelude::*;

use crate::gui::{controller::ChatWidgetController, models::WidgetState};

/// ウィジェットハンドル
#[derive(Clone, PartialEq)]
pub struct ChatWidgetHandle {
    pub controller: ChatWidgetController,
    /// 最新の状態スナップショット
    pub state: Signal<WidgetState>,
}

impl ChatWidgetHandle {
    pub fn toggle(&self) {
        self.controller.toggle();
    }

    pub fn set_input(&self, text: String) {
        self.controller.set_input(text);
    }

    /// 入力欄の内容を送信
    pub fn submit(&self) {
        let controller = self.controller.clone();
        spawn(async move {
            controller.submit().await;
        });
    }

    pub fn send_quick_action(&self, message: &'static str) {
        let controller = self.controller.clone();
        spawn(async move {
            controller.send_quick_action(message).await;
        });
    }

    pub fn dismiss_warning(&self) {
        self.controller.hide_watch_warning();
    }
}

/// コントローラーをコンポーネントに接続する
///
/// 初回レンダリング時に `initialize()`（履歴の読み込み）を1度だけ起動する。
pub fn use_chat_widget(controller: ChatWidgetController) -> ChatWidgetHandle {
    let state = use_signal(|| controller.state());

    use_hook({
        let controller = controller.clone();
        move || {
            spawn(async move {
                controller.initialize().await;
            });
        }
    });

    // 状態変更をSignalへ反映
    use_future({
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            let mut state = state;
            async move {
                let mut revisions = controller.subscribe();
                // 購読前の変更を取りこぼさないよう一度同期
                state.set(controller.state());
                while revisions.changed().await.is_ok() {
                    let snapshot = controller.state();
                    tracing::trace!(
                        revision = *revisions.borrow(),
                        "🔄 Widget state synced"
                    );
                    state.set(snapshot);
                }
            }
        }
    });

    ChatWidgetHandle { controller, state }
}
