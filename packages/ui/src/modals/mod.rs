//! Create and edit dialogs. Each one keeps its form as local signal state and
//! hands it to the matching controller on submit.

mod create_post;
mod create_skill_share;
mod create_story;
mod learning_progress;
mod profile;

pub use create_post::CreatePostModal;
pub use create_skill_share::CreateSkillShareModal;
pub use create_story::CreateStoryModal;
pub use learning_progress::LearningProgressModal;
pub use profile::ProfileModal;

use dioxus::prelude::*;
use store::FieldErrors;

/// Inline validation message under a field.
#[component]
fn FieldError(errors: FieldErrors, field: &'static str) -> Element {
    match errors.get(field) {
        Some(message) => rsx! {
            p { class: "field-error", "{message}" }
        },
        None => rsx! {},
    }
}
