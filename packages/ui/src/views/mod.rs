mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod center_section;
pub use center_section::CenterSection;

mod post_card;
pub use post_card::PostCard;

mod learning_progress_card;
pub use learning_progress_card::LearningProgressCard;

mod skill_share_card;
pub use skill_share_card::SkillShareCard;

mod story_strip;
pub use story_strip::StoryStrip;

use dioxus::prelude::*;
use store::models::{MediaItem, MediaKind};

/// One image or video in a media grid, with an optional remove button.
#[component]
pub fn MediaTile(item: MediaItem, on_remove: Option<EventHandler<String>>) -> Element {
    let url = item.url.clone();
    rsx! {
        div {
            class: "media-tile",
            match item.kind {
                MediaKind::Image => rsx! {
                    img { src: "{item.url}", alt: "{item.name}" }
                },
                MediaKind::Video => rsx! {
                    video { src: "{item.url}", controls: true }
                },
            }
            if let Some(on_remove) = on_remove {
                button {
                    class: "media-remove",
                    title: "Remove",
                    onclick: move |_| on_remove.call(url.clone()),
                    "×"
                }
            }
        }
    }
}

/// Round user picture, or a placeholder when there is none.
#[component]
pub fn Avatar(image: Option<String>, on_click: Option<EventHandler<()>>) -> Element {
    let onclick = move |_| {
        if let Some(handler) = on_click {
            handler.call(());
        }
    };
    rsx! {
        button {
            class: "avatar",
            title: "Profile",
            onclick: onclick,
            match image {
                Some(src) => rsx! { img { src: "{src}", alt: "avatar" } },
                None => rsx! { span { class: "avatar-placeholder" } },
            }
        }
    }
}
