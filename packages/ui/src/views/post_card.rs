use dioxus::prelude::*;
use store::models::{MediaKind, Owned, Post};
use store::state::{CurrentUser, Deleting};

use crate::context::{use_app, use_cancel_token, use_path};

#[component]
pub fn PostCard(post: Post) -> Element {
    let app = use_app();
    let token = use_cancel_token();
    let user = use_path::<CurrentUser>();
    let deleting = use_path::<Deleting>();

    let is_owner = post.is_owned_by(user().as_ref());
    let busy = deleting().contains(&post.id);
    let id = post.id.clone();

    let on_delete = move |_| {
        let app = app.clone();
        let token = token.clone();
        let id = id.clone();
        spawn_forever(async move {
            if let Err(e) = app.controllers().posts.submit_delete(&id, &token).await {
                app.report(&e);
            }
        });
    };

    rsx! {
        article {
            class: "card post-card",
            p { class: "card-text", "{post.content_description}" }
            match post.media_type {
                MediaKind::Image => rsx! {
                    img { class: "card-media", src: "{post.media_link}", alt: "post media" }
                },
                MediaKind::Video => rsx! {
                    video { class: "card-media", src: "{post.media_link}", controls: true }
                },
            }
            if is_owner {
                div {
                    class: "card-actions",
                    button {
                        class: "button danger",
                        disabled: busy,
                        onclick: on_delete,
                        if busy { "Deleting..." } else { "Delete" }
                    }
                }
            }
        }
    }
}
