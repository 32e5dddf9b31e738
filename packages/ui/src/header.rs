use dioxus::prelude::*;
use store::state::CurrentUser;

use crate::context::use_path;

/// Landing hero. "Join LearnLoop" goes straight to the feed for a signed-in
/// user and asks for a sign-in otherwise.
#[component]
pub fn Header(on_sign_in: EventHandler<()>, on_enter: EventHandler<()>) -> Element {
    let user = use_path::<CurrentUser>();

    rsx! {
        header {
            class: "landing",
            div {
                class: "landing-copy",
                h1 { "Learn together, loop by loop." }
                p {
                    class: "muted",
                    "Share what you are learning, track your progress and swap skills with the community."
                }
                button {
                    class: "button primary",
                    onclick: move |_| {
                        if user().is_some() {
                            on_enter.call(());
                        } else {
                            on_sign_in.call(());
                        }
                    },
                    "Join LearnLoop"
                }
            }
        }
    }
}
