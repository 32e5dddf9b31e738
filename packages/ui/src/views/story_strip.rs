use dioxus::prelude::*;
use store::models::Story;
use store::state::{ModalKind, Stories};
use store::SubmitError;

use crate::context::{use_app, use_path};

/// Horizontal strip of stories, led by a "create" tile.
#[component]
pub fn StoryStrip() -> Element {
    let app = use_app();
    let stories = use_path::<Stories>();

    let on_create = move |_| {
        if app.store.current_user().is_some() {
            app.store.open_modal(ModalKind::CreateStory);
        } else {
            app.report(&SubmitError::NotSignedIn);
        }
    };

    rsx! {
        div {
            class: "story-strip",
            button {
                class: "story-tile story-tile--create",
                onclick: on_create,
                span { class: "story-plus", "+" }
                span { "Create story" }
            }
            for story in stories() {
                StoryTile { key: "{story.id}", story: story.clone() }
            }
        }
    }
}

#[component]
fn StoryTile(story: Story) -> Element {
    let details = [
        story.category.map(|c| c.label().to_string()),
        story.intensity.map(|i| i.label().to_string()),
        Some(format!("{} min", story.time_duration)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");

    rsx! {
        div {
            class: "story-tile",
            if let Some(image) = &story.image {
                img { src: "{image}", alt: "{story.title}" }
            }
            div {
                class: "story-caption",
                strong { "{story.title}" }
                if !story.exercise_type.is_empty() {
                    span { "{story.exercise_type}" }
                }
                span { class: "muted", "{details}" }
                if let Some(date) = &story.timestamp {
                    span { class: "muted", "{date}" }
                }
            }
        }
    }
}
