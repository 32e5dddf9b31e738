use dioxus::prelude::*;
use store::state::CurrentUser;
use ui::{use_path, CenterSection};

use crate::Route;

/// The community feed. Signed-out visitors get a way back to the landing
/// page instead of an empty feed.
#[component]
pub fn Community() -> Element {
    let user = use_path::<CurrentUser>();
    let nav = use_navigator();

    if user().is_none() {
        return rsx! {
            div {
                class: "signed-out",
                h2 { "You are signed out" }
                p { class: "muted", "Sign in to see what the community is learning." }
                button {
                    class: "button primary",
                    onclick: move |_| {
                        nav.replace(Route::Landing {});
                    },
                    "Back to LearnLoop"
                }
            }
        };
    }

    rsx! {
        main {
            class: "community",
            CenterSection {}
        }
    }
}
