use dioxus::prelude::*;
use store::state::ModalKind;
use store::{FieldErrors, PostForm, UploadCategory};

use super::FieldError;
use crate::context::{use_app, use_cancel_token};
use crate::media::read_picked_files;
use crate::views::{MediaTile, ModalOverlay};

/// One media file plus a description. Submit stays disabled until the media
/// has finished uploading.
#[component]
pub fn CreatePostModal() -> Element {
    let app = use_app();
    let token = use_cancel_token();
    let mut form = use_signal(PostForm::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut uploading = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let policy = app.post_policy();

    let on_pick = {
        let app = app.clone();
        move |evt: FormEvent| {
            let app = app.clone();
            spawn(async move {
                uploading.set(true);
                let files = read_picked_files(&evt).await;
                let report = app
                    .uploader()
                    .upload_batch(files, 0, &policy, UploadCategory::Posts)
                    .await;
                if let Some(item) = report.uploaded.into_iter().next() {
                    form.write().media = Some(item);
                    errors.set(FieldErrors::new());
                }
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
                let result = app.controllers().posts.submit_create(&mut draft, &token).await;
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
    let ready = form().media.is_some() && !uploading() && !submitting();

    rsx! {
        ModalOverlay {
            title: "Create post",
            on_close: move |_: ()| close.close_modal(ModalKind::CreatePost),
            div {
                class: "form-field",
                label { r#for: "post-description", "Description" }
                textarea {
                    id: "post-description",
                    placeholder: "What did you learn today?",
                    value: "{form().content_description}",
                    oninput: move |evt: FormEvent| form.write().content_description = evt.value(),
                }
                FieldError { errors: errors(), field: "content_description" }
            }
            div {
                class: "form-field",
                label { r#for: "post-media", "Image or video" }
                input {
                    id: "post-media",
                    r#type: "file",
                    accept: policy.accept(),
                    disabled: uploading(),
                    onchange: on_pick,
                }
                if uploading() {
                    p { class: "muted", "Uploading..." }
                }
                if let Some(item) = form().media {
                    div { class: "media-grid media-grid--1", MediaTile { item: item } }
                }
                FieldError { errors: errors(), field: "media" }
            }
            div {
                class: "form-actions",
                button {
                    class: "button primary",
                    disabled: !ready,
                    onclick: on_submit,
                    if submitting() { "Posting..." } else { "Post" }
                }
            }
        }
    }
}
