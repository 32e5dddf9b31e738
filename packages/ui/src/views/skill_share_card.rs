use dioxus::prelude::*;
use store::models::{Owned, SkillShare};
use store::state::{CurrentUser, Deleting};

use crate::context::{use_app, use_cancel_token, use_path};
use crate::views::MediaTile;

#[component]
pub fn SkillShareCard(share: SkillShare) -> Element {
    let app = use_app();
    let token = use_cancel_token();
    let user = use_path::<CurrentUser>();
    let deleting = use_path::<Deleting>();

    let is_owner = share.is_owned_by(user().as_ref());
    let busy = deleting().contains(&share.id);
    let id = share.id.clone();

    let on_delete = move |_| {
        let app = app.clone();
        let token = token.clone();
        let id = id.clone();
        spawn_forever(async move {
            let controller = app.controllers().skill_shares;
            if let Err(e) = controller.submit_delete(&id, &token).await {
                app.report(&e);
            }
        });
    };

    rsx! {
        article {
            class: "card skill-share-card",
            p { class: "card-text", "{share.description}" }
            if !share.media.is_empty() {
                div {
                    class: "media-grid media-grid--{share.media.len()}",
                    for item in share.media.iter() {
                        MediaTile { key: "{item.url}", item: item.clone() }
                    }
                }
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
