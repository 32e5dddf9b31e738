use std::time::Duration;

use dioxus::prelude::*;
use store::state::{Notice, NoticeLevel, Notices as NoticesPath};

use crate::context::{use_path, use_store};
use crate::media::sleep;

const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Toast stack for pending notices.
#[component]
pub fn Notices() -> Element {
    let notices = use_path::<NoticesPath>();

    rsx! {
        div {
            class: "notices",
            for notice in notices() {
                Toast { key: "{notice.id}", notice: notice.clone() }
            }
        }
    }
}

#[component]
fn Toast(notice: Notice) -> Element {
    let store = use_store();
    let id = notice.id;

    // Dropped with the toast when it is dismissed by hand.
    let expiry = store.clone();
    use_hook(move || {
        spawn(async move {
            sleep(NOTICE_TTL).await;
            expiry.dismiss_notice(id);
        });
    });

    rsx! {
        div {
            class: match notice.level {
                NoticeLevel::Error => "notice error",
                NoticeLevel::Warning => "notice warning",
                NoticeLevel::Success => "notice success",
                NoticeLevel::Info => "notice info",
            },
            role: "status",
            span { "{notice.message}" }
            button {
                class: "notice-close",
                onclick: move |_| store.dismiss_notice(id),
                "×"
            }
        }
    }
}
