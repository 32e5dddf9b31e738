//! # Community feed
//!
//! [`CenterSection`] is the signed-in home: nav bar with the user's avatar,
//! story strip, tab bar and the active tab's list. Posts, learning progress,
//! skill shares and stories are all loaded once on mount; switching tabs only
//! changes which list is rendered.
//!
//! | Tab | Create entry | Cards |
//! |-----|--------------|-------|
//! | Comment & Feedback | [`CreatePostModal`] | [`PostCard`] |
//! | Learning Progress Updates | [`LearningProgressModal`] | [`LearningProgressCard`] |
//! | SkillShare | [`CreateSkillShareModal`] | [`SkillShareCard`] |
//! | Friends | none | none yet |

use dioxus::prelude::*;
use store::feed::{select_tab, FeedTab};
use store::state::{
    ActiveTab, CurrentUser, LearningProgressList, ModalKind, Modals, Posts, SkillShares,
};
use store::SubmitError;

use crate::context::{use_app, use_cancel_token, use_path};
use crate::modals::{
    CreatePostModal, CreateSkillShareModal, CreateStoryModal, LearningProgressModal, ProfileModal,
};
use crate::views::{Avatar, LearningProgressCard, PostCard, SkillShareCard, StoryStrip};

#[component]
pub fn CenterSection() -> Element {
    let app = use_app();
    let token = use_cancel_token();
    let user = use_path::<CurrentUser>();
    let tab = use_path::<ActiveTab>();
    let modals = use_path::<Modals>();

    use_hook({
        let app = app.clone();
        move || {
            spawn_forever(async move {
                app.controllers().load_all(&token).await;
            });
        }
    });

    let profile = app.store.clone();
    let open = modals();

    rsx! {
        div {
            class: "center-section",
            nav {
                class: "feed-nav",
                span { class: "brand", "LearnLoop" }
                Avatar {
                    image: user().and_then(|u| u.image),
                    on_click: move |_: ()| profile.open_modal(ModalKind::Profile),
                }
            }
            StoryStrip {}
            div {
                class: "feed-tabs",
                role: "tablist",
                for t in FeedTab::ALL {
                    TabButton { key: "{t.title()}", tab: t, active: tab() == t }
                }
            }
            div {
                class: "feed-list",
                role: "tabpanel",
                match tab() {
                    FeedTab::Posts => rsx! { PostFeed {} },
                    FeedTab::LearningProgress => rsx! { LearningProgressFeed {} },
                    FeedTab::SkillShares => rsx! { SkillShareFeed {} },
                    FeedTab::Friends => rsx! {
                        p { class: "muted empty", "Friends are coming soon." }
                    },
                }
            }

            if open.create_post {
                CreatePostModal {}
            }
            if open.create_learning_progress {
                LearningProgressModal { editing: false }
            }
            if open.edit_learning_progress {
                LearningProgressModal { editing: true }
            }
            if open.create_skill_share {
                CreateSkillShareModal {}
            }
            if open.create_story {
                CreateStoryModal {}
            }
            if open.profile {
                ProfileModal {}
            }
        }
    }
}

#[component]
fn TabButton(tab: FeedTab, active: bool) -> Element {
    let app = use_app();
    rsx! {
        button {
            class: if active { "feed-tab active" } else { "feed-tab" },
            role: "tab",
            aria_selected: "{active}",
            onclick: move |_| {
                select_tab(&app.store, tab);
            },
            "{tab.title()}"
        }
    }
}

/// The "start a new ..." box at the top of a list.
#[component]
fn CreateEntry(prompt: String, modal: ModalKind) -> Element {
    let app = use_app();
    let onclick = move |_| {
        if app.store.current_user().is_some() {
            app.store.open_modal(modal);
        } else {
            app.report(&SubmitError::NotSignedIn);
        }
    };
    rsx! {
        button { class: "create-entry", onclick: onclick, "{prompt}" }
    }
}

#[component]
fn PostFeed() -> Element {
    let posts = use_path::<Posts>();
    rsx! {
        CreateEntry { prompt: "Share what you learned...", modal: ModalKind::CreatePost }
        if posts().is_empty() {
            p { class: "muted empty", "No posts yet." }
        }
        for post in posts() {
            PostCard { key: "{post.id}", post: post.clone() }
        }
    }
}

#[component]
fn LearningProgressFeed() -> Element {
    let items = use_path::<LearningProgressList>();
    rsx! {
        CreateEntry {
            prompt: "Post a learning progress update...",
            modal: ModalKind::CreateLearningProgress,
        }
        if items().is_empty() {
            p { class: "muted empty", "No learning progress updates yet." }
        }
        for record in items() {
            LearningProgressCard { key: "{record.id}", record: record.clone() }
        }
    }
}

#[component]
fn SkillShareFeed() -> Element {
    let shares = use_path::<SkillShares>();
    rsx! {
        CreateEntry { prompt: "Share a skill...", modal: ModalKind::CreateSkillShare }
        if shares().is_empty() {
            p { class: "muted empty", "No skill shares yet." }
        }
        for share in shares() {
            SkillShareCard { key: "{share.id}", share: share.clone() }
        }
    }
}
