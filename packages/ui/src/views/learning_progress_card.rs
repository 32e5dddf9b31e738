use dioxus::prelude::*;
use store::models::{LearningProgress, Owned};
use store::state::{CurrentUser, Deleting};

use crate::context::{use_app, use_cancel_token, use_path};

/// Collapsible card for one learning plan.
#[component]
pub fn LearningProgressCard(record: LearningProgress) -> Element {
    let app = use_app();
    let token = use_cancel_token();
    let user = use_path::<CurrentUser>();
    let deleting = use_path::<Deleting>();
    let mut expanded = use_signal(|| false);

    let is_owner = record.is_owned_by(user().as_ref());
    let busy = deleting().contains(&record.id);
    let percent = record.progress_percent();
    let skills: Vec<String> = record.skills().into_iter().map(str::to_string).collect();

    let on_edit = {
        let app = app.clone();
        let record = record.clone();
        move |evt: Event<MouseData>| {
            evt.stop_propagation();
            if let Err(e) = app.controllers().learning_progress.open_edit(&record) {
                app.report(&e);
            }
        }
    };

    let on_delete = {
        let id = record.id.clone();
        move |evt: Event<MouseData>| {
            evt.stop_propagation();
            let app = app.clone();
            let token = token.clone();
            let id = id.clone();
            spawn_forever(async move {
                let controller = app.controllers().learning_progress;
                if let Err(e) = controller.submit_delete(&id, &token).await {
                    app.report(&e);
                }
            });
        }
    };

    rsx! {
        article {
            class: if expanded() { "card progress-card expanded" } else { "card progress-card" },
            onclick: move |_| expanded.toggle(),
            div {
                class: "progress-card-header",
                h3 { "{record.plan_name}" }
                if let Some(updated) = &record.last_updated {
                    span { class: "muted", "Updated {updated}" }
                }
            }
            div {
                class: "progress-bar",
                title: "{percent}% complete",
                div { class: "progress-bar-fill", style: "width: {percent}%" }
            }
            if expanded() {
                p { class: "card-text", "{record.description}" }
                if !skills.is_empty() {
                    div {
                        class: "skill-tags",
                        for skill in skills {
                            span { class: "skill-tag", "{skill}" }
                        }
                    }
                }
                if !record.goal.is_empty() {
                    div {
                        class: "tutorials",
                        h4 { "Tutorials" }
                        p { "{record.goal}" }
                    }
                }
            }
            if is_owner {
                div {
                    class: "card-actions",
                    button { class: "button", disabled: busy, onclick: on_edit, "Edit" }
                    button {
                        class: "button danger",
                        disabled: busy,
                        onclick: on_delete,
                        if busy {
                            span { class: "spinner" }
                        } else {
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
