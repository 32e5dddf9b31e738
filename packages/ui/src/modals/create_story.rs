use dioxus::prelude::*;
use store::models::{Intensity, StoryCategory, MAX_STORY_MINUTES};
use store::state::ModalKind;
use store::{FieldErrors, StoryForm, UploadCategory};

use super::FieldError;
use crate::context::{use_app, use_cancel_token};
use crate::media::read_picked_files;
use crate::views::ModalOverlay;

/// Story form with a live preview toggle.
#[component]
pub fn CreateStoryModal() -> Element {
    let app = use_app();
    let token = use_cancel_token();
    let mut form = use_signal(StoryForm::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut preview = use_signal(|| false);
    let mut uploading = use_signal(|| false);
    let mut submitting = use_signal(|| false);
    let policy = app.story_policy();

    let on_pick = {
        let app = app.clone();
        move |evt: FormEvent| {
            let app = app.clone();
            spawn(async move {
                uploading.set(true);
                let files = read_picked_files(&evt).await;
                let report = app
                    .uploader()
                    .upload_batch(files, 0, &policy, UploadCategory::Stories)
                    .await;
                if let Some(item) = report.uploaded.into_iter().next() {
                    form.write().image = Some(item.url);
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
                let result = app.controllers().stories.submit_create(&mut draft, &token).await;
                if token.is_cancelled() {
                    return;
                }
                match result {
                    Ok(()) => form.set(draft),
                    Err(e) => {
                        if let Some(fields) = e.field_errors() {
                            errors.set(fields.clone());
                            preview.set(false);
                        }
                        app.report(&e);
                    }
                }
                submitting.set(false);
            });
        }
    };

    let close = app.store.clone();
    let current = form();

    rsx! {
        ModalOverlay {
            title: "Create story",
            on_close: move |_: ()| close.close_modal(ModalKind::CreateStory),
            div {
                class: "segmented",
                button {
                    class: if !preview() { "active" } else { "" },
                    onclick: move |_| preview.set(false),
                    "Form"
                }
                button {
                    class: if preview() { "active" } else { "" },
                    onclick: move |_| preview.set(true),
                    "Preview"
                }
            }
            if preview() {
                StoryPreview { form: current.clone() }
            } else {
                div {
                    class: "form-field",
                    label { r#for: "story-title", "Title" }
                    input {
                        id: "story-title",
                        value: "{current.title}",
                        oninput: move |evt: FormEvent| form.write().title = evt.value(),
                    }
                    FieldError { errors: errors(), field: "title" }
                }
                div {
                    class: "form-row",
                    div {
                        class: "form-field",
                        label { r#for: "story-date", "Start date" }
                        input {
                            id: "story-date",
                            r#type: "date",
                            value: current.timestamp.clone().unwrap_or_default(),
                            oninput: move |evt: FormEvent| {
                                let value = evt.value();
                                form.write().timestamp = (!value.is_empty()).then_some(value);
                            },
                        }
                    }
                    div {
                        class: "form-field",
                        label { r#for: "story-exercise", "Exercise type" }
                        input {
                            id: "story-exercise",
                            value: "{current.exercise_type}",
                            oninput: move |evt: FormEvent| form.write().exercise_type = evt.value(),
                        }
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "story-category", "Category" }
                    select {
                        id: "story-category",
                        value: current.category.map(|c| c.label()).unwrap_or_default(),
                        onchange: move |evt: FormEvent| {
                            form.write().category = StoryCategory::from_label(&evt.value());
                        },
                        option { value: "", "Choose a level" }
                        for category in StoryCategory::ALL {
                            option { value: category.label(), "{category.label()}" }
                        }
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "story-description", "Description" }
                    textarea {
                        id: "story-description",
                        value: "{current.description}",
                        oninput: move |evt: FormEvent| form.write().description = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "story-duration", "Duration: {current.time_duration} min" }
                    input {
                        id: "story-duration",
                        r#type: "range",
                        min: "0",
                        max: "{MAX_STORY_MINUTES}",
                        value: "{current.time_duration}",
                        oninput: move |evt: FormEvent| {
                            if let Ok(minutes) = evt.value().parse::<u32>() {
                                form.write().time_duration = minutes.min(MAX_STORY_MINUTES);
                            }
                        },
                    }
                    FieldError { errors: errors(), field: "time_duration" }
                }
                div {
                    class: "form-field",
                    label { "Difficulty" }
                    div {
                        class: "intensity-picker",
                        for intensity in Intensity::ALL {
                            button {
                                class: if current.intensity == Some(intensity) { "chip active" } else { "chip" },
                                onclick: move |_| form.write().intensity = Some(intensity),
                                "{intensity.label()}"
                            }
                        }
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "story-image", "Cover image" }
                    input {
                        id: "story-image",
                        r#type: "file",
                        accept: policy.accept(),
                        disabled: uploading(),
                        onchange: on_pick,
                    }
                    if uploading() {
                        p { class: "muted", "Uploading..." }
                    }
                }
            }
            div {
                class: "form-actions",
                button {
                    class: "button primary",
                    disabled: uploading() || submitting(),
                    onclick: on_submit,
                    if submitting() { "Publishing..." } else { "Publish" }
                }
            }
        }
    }
}

#[component]
fn StoryPreview(form: StoryForm) -> Element {
    rsx! {
        div {
            class: "story-preview",
            if let Some(image) = &form.image {
                img { src: "{image}", alt: "story cover" }
            }
            h3 { "{form.title}" }
            if let Some(date) = &form.timestamp {
                p { class: "muted", "{date}" }
            }
            p { "{form.exercise_type}" }
            p { "{form.description}" }
            p {
                class: "muted",
                "{form.time_duration} min"
                if let Some(category) = form.category {
                    " · {category.label()}"
                }
                if let Some(intensity) = form.intensity {
                    " · {intensity.label()}"
                }
            }
        }
    }
}
