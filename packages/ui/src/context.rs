//! App context and store hooks for the UI.
//!
//! [`LearnLoopProvider`] owns the [`Store`] and the backend for the session and
//! shares them as context. Components read store paths through [`use_path`],
//! which keeps a signal in step with the store for as long as the component
//! is mounted.

use api::Backend;
use dioxus::prelude::*;
use futures::StreamExt;
use store::{
    CancelToken, Controllers, LearnLoopConfig, Path, Store, SubmitError, UploadPolicy, Uploader,
};
use store::state::NoticeLevel;

use crate::media::MediaDuration;

/// Everything a component needs to reach the store and the backend.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub store: Store,
    pub backend: Backend,
    pub config: LearnLoopConfig,
}

impl AppContext {
    pub fn new(config: LearnLoopConfig) -> Self {
        Self {
            store: Store::new(),
            backend: Backend::from_config(&config),
            config,
        }
    }

    pub fn controllers(&self) -> Controllers<Backend> {
        Controllers::new(
            self.store.clone(),
            self.backend.clone(),
            self.config.media.max_files(),
        )
    }

    pub fn uploader(&self) -> Uploader<Backend, MediaDuration> {
        Uploader::new(self.store.clone(), self.backend.clone(), MediaDuration::default())
    }

    pub fn skill_share_policy(&self) -> UploadPolicy {
        self.config.media.skill_share_policy()
    }

    pub fn post_policy(&self) -> UploadPolicy {
        self.config.media.post_policy()
    }

    pub fn story_policy(&self) -> UploadPolicy {
        self.config.media.story_policy()
    }

    /// Tell the user about failures the controllers leave to the caller.
    ///
    /// Remote failures were already posted by the controller, validation
    /// failures are shown next to their fields.
    pub fn report(&self, error: &SubmitError) {
        match error {
            SubmitError::NotSignedIn | SubmitError::NotOwner => {
                self.store.notify(NoticeLevel::Warning, error.to_string());
            }
            SubmitError::Invalid(errors) => {
                tracing::debug!(%errors, "form rejected");
            }
            SubmitError::Remote(_) | SubmitError::Cancelled => {}
        }
    }
}

/// Get the app context provided by [`LearnLoopProvider`].
pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

pub fn use_store() -> Store {
    use_app().store
}

/// Current value at store path `P`, refreshed whenever `P` is written.
///
/// The subscription lives in a task owned by the calling component and is
/// dropped with it.
pub fn use_path<P: Path>() -> Signal<P::Value> {
    let store = use_store();
    let mut value = use_signal(|| store.read::<P>());
    use_hook(move || {
        let mut changes = store.subscribe([P::PATH]);
        spawn(async move {
            while changes.next().await.is_some() {
                value.set(store.read::<P>());
            }
        });
    });
    value
}

/// A token cancelled when the calling component unmounts.
pub fn use_cancel_token() -> CancelToken {
    let token = use_hook(CancelToken::new);
    let on_drop = token.clone();
    use_drop(move || on_drop.cancel());
    token
}

/// Provider component that creates the store and the backend.
/// Wrap your app with this component.
#[component]
pub fn LearnLoopProvider(config: LearnLoopConfig, children: Element) -> Element {
    use_context_provider(move || AppContext::new(config));

    rsx! {
        document::Link { rel: "stylesheet", href: crate::LEARNLOOP_CSS }
        {children}
    }
}
