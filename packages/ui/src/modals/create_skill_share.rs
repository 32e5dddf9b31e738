use dioxus::prelude::*;
use store::state::ModalKind;
use store::{FieldErrors, SkillShareForm, UploadCategory};

use super::FieldError;
use crate::context::{use_app, use_cancel_token};
use crate::media::read_picked_files;
use crate::views::{MediaTile, ModalOverlay};

/// Description plus up to the configured number of images or videos. Each
/// attachment can be removed again before submitting.
#[component]
pub fn CreateSkillShareModal() -> Element {
    let app = use_app();
    let token = use_cancel_token();
    let mut form = use_signal(SkillShareForm::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut uploading = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let policy = app.skill_share_policy();

    let on_pick = {
        let app = app.clone();
        move |evt: FormEvent| {
            let app = app.clone();
            spawn(async move {
                uploading.set(true);
                let files = read_picked_files(&evt).await;
                let existing = form.read().media.len();
                let report = app
                    .uploader()
                    .upload_batch(files, existing, &policy, UploadCategory::Posts)
                    .await;
                form.write().media.extend(report.uploaded);
                uploading.set(false);
            });
        }
    };

    let on_submit = {
        let app = app.clone();
        move |_| {
            let app = app.clone();
            let token = token.clone();
            let mut draft = form();
            submitting.set(true);
            spawn_forever(async move {
                let controller = app.controllers().skill_shares;
                let result = controller.submit_create(&mut draft, &token).await;
                if token.is_cancelled() {
                    return;
                }
                match result {
                    Ok(()) => form.set(draft),
                    Err(e) => {
                        if let Some(fields) = e.field_errors() {
                            errors.set(fields.clone());
                        }
                        app.report(&e);
                    }
                }
                submitting.set(false);
            });
        }
    };

    let close = app.store.clone();
    let remaining = form().remaining_slots(policy.max_files);
    let media = form().media;

    rsx! {
        ModalOverlay {
            title: "Share a skill",
            wide: true,
            on_close: move |_: ()| close.close_modal(ModalKind::CreateSkillShare),
            div {
                class: "form-field",
                label { r#for: "skill-description", "Details" }
                textarea {
                    id: "skill-description",
                    placeholder: "What can you teach others?",
                    value: "{form().description}",
                    oninput: move |evt: FormEvent| form.write().description = evt.value(),
                }
                FieldError { errors: errors(), field: "description" }
            }
            div {
                class: "form-field",
                label { r#for: "skill-media", "Photos and videos ({remaining} left)" }
                input {
                    id: "skill-media",
                    r#type: "file",
                    multiple: true,
                    accept: policy.accept(),
                    disabled: uploading() || remaining == 0,
                    onchange: on_pick,
                }
                p {
                    class: "muted",
                    "Up to {policy.max_files} files. Videos must be {policy.max_video_secs} seconds or less."
                }
                if uploading() {
                    p { class: "muted", "Uploading..." }
                }
                if !media.is_empty() {
                    div {
                        class: "media-grid media-grid--{media.len()}",
                        for item in media.iter() {
                            MediaTile {
                                key: "{item.url}",
                                item: item.clone(),
                                on_remove: move |url: String| form.write().remove_media(&url),
                            }
                        }
                    }
                }
                FieldError { errors: errors(), field: "media" }
            }
            div {
                class: "form-actions",
                button {
                    class: "button primary",
                    disabled: media.is_empty() || uploading() || submitting(),
                    onclick: on_submit,
                    if submitting() { "Sharing..." } else { "Share" }
                }
            }
        }
    }
}
