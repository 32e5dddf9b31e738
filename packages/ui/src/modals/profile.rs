use dioxus::prelude::*;
use store::state::{CurrentUser, ModalKind};

use crate::context::{use_path, use_store};
use crate::views::{Avatar, ModalOverlay};

#[component]
pub fn ProfileModal() -> Element {
    let store = use_store();
    let user = use_path::<CurrentUser>();

    let close = store.clone();
    let sign_out = move |_| {
        tracing::info!("signed out");
        store.write::<CurrentUser>(None);
        store.close_modal(ModalKind::Profile);
    };

    rsx! {
        ModalOverlay {
            title: "Profile",
            on_close: move |_: ()| close.close_modal(ModalKind::Profile),
            match user() {
                Some(user) => rsx! {
                    div {
                        class: "profile",
                        Avatar { image: user.image.clone() }
                        p { class: "muted", "Signed in as {user.uid}" }
                        button { class: "button", onclick: sign_out, "Sign out" }
                    }
                },
                None => rsx! {
                    p { class: "muted", "Not signed in." }
                },
            }
        }
    }
}
