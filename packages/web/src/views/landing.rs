//! Landing page with the sign-in entry point.

use dioxus::prelude::*;
use store::models::User;
use store::state::CurrentUser;
use ui::{use_store, Header};

use crate::Route;

/// Uid used by the demo sign-in until an identity provider is wired in.
const DEMO_UID: &str = "learner";

#[component]
pub fn Landing() -> Element {
    let store = use_store();
    let nav = use_navigator();

    rsx! {
        Header {
            on_sign_in: move |_| {
                tracing::info!(uid = DEMO_UID, "signed in");
                store.write::<CurrentUser>(Some(User::new(DEMO_UID)));
                nav.push(Route::Community {});
            },
            on_enter: move |_| {
                nav.push(Route::Community {});
            },
        }
    }
}
