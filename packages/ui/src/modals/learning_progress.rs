use dioxus::prelude::*;
use store::state::{ModalKind, SelectedLearningProgress};
use store::{FieldErrors, LearningProgressForm};

use super::FieldError;
use crate::context::{use_app, use_cancel_token, use_path};
use crate::views::ModalOverlay;

/// Create a learning plan, or edit the selected one when `editing` is set.
#[component]
pub fn LearningProgressModal(editing: bool) -> Element {
    let app = use_app();
    let token = use_cancel_token();
    let selected = use_path::<SelectedLearningProgress>();
    let editing_id = selected().filter(|_| editing).map(|record| record.id);
    let mut form = use_signal(|| match selected() {
        Some(record) if editing => LearningProgressForm::from_record(&record),
        _ => LearningProgressForm::default(),
    });
    let mut errors = use_signal(FieldErrors::new);
    let mut submitting = use_signal(|| false);

    let on_close = {
        let app = app.clone();
        move |_: ()| {
            if editing {
                app.controllers().learning_progress.close_edit();
            } else {
                app.store.close_modal(ModalKind::CreateLearningProgress);
            }
        }
    };

    let on_submit = {
        let id = editing_id.clone();
        move |_| {
            let app = app.clone();
            let token = token.clone();
            let id = id.clone();
            let mut draft = form();
            submitting.set(true);
            spawn_forever(async move {
                let controller = app.controllers().learning_progress;
                let result = match &id {
                    Some(id) => controller.submit_edit(id, &mut draft, &token).await,
                    None => controller.submit_create(&mut draft, &token).await,
                };
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

    let title = if editing_id.is_some() {
        "Edit learning progress"
    } else {
        "Share learning progress"
    };

    rsx! {
        ModalOverlay {
            title: "{title}",
            on_close: on_close,
            div {
                class: "form-field",
                label { r#for: "lp-title", "Title" }
                input {
                    id: "lp-title",
                    value: "{form().plan_name}",
                    oninput: move |evt: FormEvent| form.write().plan_name = evt.value(),
                }
                FieldError { errors: errors(), field: "plan_name" }
            }
            div {
                class: "form-field",
                label { r#for: "lp-description", "Description" }
                textarea {
                    id: "lp-description",
                    value: "{form().description}",
                    oninput: move |evt: FormEvent| form.write().description = evt.value(),
                }
                FieldError { errors: errors(), field: "description" }
            }
            div {
                class: "form-field",
                label { r#for: "lp-tutorials", "Tutorials" }
                textarea {
                    id: "lp-tutorials",
                    placeholder: "Courses, books and videos you used",
                    value: "{form().goal}",
                    oninput: move |evt: FormEvent| form.write().goal = evt.value(),
                }
                FieldError { errors: errors(), field: "goal" }
            }
            div {
                class: "form-field",
                label { r#for: "lp-skills", "Skills" }
                input {
                    id: "lp-skills",
                    placeholder: "Comma separated, e.g. traits, lifetimes",
                    value: "{form().routines}",
                    oninput: move |evt: FormEvent| form.write().routines = evt.value(),
                }
                FieldError { errors: errors(), field: "routines" }
            }
            div {
                class: "form-actions",
                button {
                    class: "button primary",
                    disabled: submitting(),
                    onclick: on_submit,
                    if submitting() {
                        "Saving..."
                    } else if editing_id.is_some() {
                        "Update"
                    } else {
                        "Share"
                    }
                }
            }
        }
    }
}
