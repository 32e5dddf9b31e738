//! # Sync-on-write controllers
//!
//! One controller per entity binds a form to the [`Remote`] and the [`Store`].
//! Every mutation follows the same sequence:
//!
//! | Step | On failure |
//! |------|------------|
//! | signed-in check | `NotSignedIn`, nothing sent |
//! | local validation / owner check | `Invalid` / `NotOwner`, nothing sent |
//! | remote create/update/delete | error notice, modal and form left as they are |
//! | remote list, replace store list | warning notice, list left stale |
//! | close modal, success notice, clear form | |
//!
//! Lists are never patched locally; the refetched list is authoritative.
//!
//! Every operation takes a [`CancelToken`]. Remote calls always run to
//! completion, but once the token is cancelled the result is dropped and the
//! operation reports [`SubmitError::Cancelled`] without touching the store.
//! The one exception is the per-item delete flag, which is always cleared by
//! the operation that set it.

mod learning_progress;
mod post;
mod skill_share;
mod story;

pub use learning_progress::LearningProgressController;
pub use post::PostController;
pub use skill_share::SkillShareController;
pub use story::StoryController;

use std::future::Future;

use crate::cancel::CancelToken;
use crate::error::{RemoteError, SubmitError};
use crate::models::{Owned, User};
use crate::remote::Remote;
use crate::state::{Deleting, ModalKind, NoticeLevel, Path, Store};

/// Names an entity in logs and notices.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entity {
    /// Lower case, for sentences.
    pub name: &'static str,
    /// Capitalised, for the start of a notice.
    pub title: &'static str,
    /// Plural, for list loads.
    pub plural: &'static str,
}

/// Store and remote handles shared by the entity controllers.
#[derive(Clone, Debug)]
pub(crate) struct Binding<R> {
    store: Store,
    remote: R,
}

/// `Err(Cancelled)` once the requesting view has gone away.
fn live(token: &CancelToken) -> Result<(), SubmitError> {
    if token.is_cancelled() {
        tracing::debug!("view gone, dropping result");
        return Err(SubmitError::Cancelled);
    }
    Ok(())
}

/// Only the record's owner may edit or delete it.
pub(crate) fn ensure_owner<T: Owned>(
    record: Option<&T>,
    user: &User,
    id: &str,
) -> Result<(), SubmitError> {
    match record {
        None => Err(SubmitError::Remote(RemoteError::NotFound(id.to_string()))),
        Some(record) if record.is_owned_by(Some(user)) => Ok(()),
        Some(_) => Err(SubmitError::NotOwner),
    }
}

impl<R: Remote> Binding<R> {
    pub fn new(store: Store, remote: R) -> Self {
        Self { store, remote }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn signed_in(&self) -> Result<User, SubmitError> {
        self.store.current_user().ok_or(SubmitError::NotSignedIn)
    }

    /// Log a remote failure and tell the user, unless the view is gone.
    fn failed(
        &self,
        entity: Entity,
        action: &str,
        error: RemoteError,
        token: &CancelToken,
    ) -> SubmitError {
        tracing::error!(entity = entity.name, action, %error, "remote call failed");
        if token.is_cancelled() {
            return SubmitError::Cancelled;
        }
        self.store.notify(
            NoticeLevel::Error,
            format!("Could not {action} {}: {error}", entity.name),
        );
        SubmitError::Remote(error)
    }

    /// Replace list `P` with the result of `list`.
    pub async fn reload<P: Path>(
        &self,
        entity: Entity,
        list: impl Future<Output = Result<P::Value, RemoteError>>,
        token: &CancelToken,
    ) -> Result<(), SubmitError> {
        match list.await {
            Ok(items) => {
                live(token)?;
                self.store.write::<P>(items);
                tracing::debug!(entity = entity.plural, "list loaded");
                Ok(())
            }
            Err(error) => Err(self.failed(entity, "load", error, token)),
        }
    }

    /// Run a create or update, refetch list `P`, close `modal`.
    ///
    /// A refetch failure after a successful write still closes the modal and
    /// returns `Ok`; the list stays stale until the next load.
    pub async fn save<P: Path, T>(
        &self,
        entity: Entity,
        verb: &str,
        modal: ModalKind,
        write: impl Future<Output = Result<T, RemoteError>>,
        list: impl Future<Output = Result<P::Value, RemoteError>>,
        token: &CancelToken,
    ) -> Result<(), SubmitError> {
        if let Err(error) = write.await {
            return Err(self.failed(entity, "save", error, token));
        }
        live(token)?;
        tracing::info!(entity = entity.name, verb, "saved");

        let refreshed = list.await;
        live(token)?;
        match refreshed {
            Ok(items) => {
                self.store.write::<P>(items);
                self.store.close_modal(modal);
                self.store
                    .notify(NoticeLevel::Success, format!("{} {verb}", entity.title));
            }
            Err(error) => {
                tracing::warn!(entity = entity.plural, %error, "refetch after save failed");
                self.store.close_modal(modal);
                self.store.notify(
                    NoticeLevel::Warning,
                    format!(
                        "{} {verb}, but the {} could not be refreshed: {error}",
                        entity.title, entity.plural
                    ),
                );
            }
        }
        Ok(())
    }

    /// Delete `id` behind its in-flight flag, then refetch list `P`.
    pub async fn delete<P: Path>(
        &self,
        entity: Entity,
        id: &str,
        delete: impl Future<Output = Result<(), RemoteError>>,
        list: impl Future<Output = Result<P::Value, RemoteError>>,
        token: &CancelToken,
    ) -> Result<(), SubmitError> {
        self.store
            .update::<Deleting, _>(|d| d.insert(id.to_string()));
        let result = self.delete_then_reload::<P>(entity, delete, list, token).await;
        self.store.update::<Deleting, _>(|d| d.remove(id));
        result
    }

    async fn delete_then_reload<P: Path>(
        &self,
        entity: Entity,
        delete: impl Future<Output = Result<(), RemoteError>>,
        list: impl Future<Output = Result<P::Value, RemoteError>>,
        token: &CancelToken,
    ) -> Result<(), SubmitError> {
        if let Err(error) = delete.await {
            return Err(self.failed(entity, "delete", error, token));
        }
        live(token)?;
        tracing::info!(entity = entity.name, "deleted");

        let refreshed = list.await;
        live(token)?;
        match refreshed {
            Ok(items) => {
                self.store.write::<P>(items);
                self.store
                    .notify(NoticeLevel::Success, format!("{} deleted", entity.title));
            }
            Err(error) => {
                tracing::warn!(entity = entity.plural, %error, "refetch after delete failed");
                self.store.notify(
                    NoticeLevel::Warning,
                    format!(
                        "{} deleted, but the {} could not be refreshed: {error}",
                        entity.title, entity.plural
                    ),
                );
            }
        }
        Ok(())
    }
}

/// All four controllers over one store and remote.
#[derive(Clone, Debug)]
pub struct Controllers<R> {
    pub posts: PostController<R>,
    pub learning_progress: LearningProgressController<R>,
    pub skill_shares: SkillShareController<R>,
    pub stories: StoryController<R>,
}

impl<R: Remote + Clone> Controllers<R> {
    pub fn new(store: Store, remote: R, max_media: usize) -> Self {
        Self {
            posts: PostController::new(store.clone(), remote.clone()),
            learning_progress: LearningProgressController::new(store.clone(), remote.clone()),
            skill_shares: SkillShareController::new(store.clone(), remote.clone(), max_media),
            stories: StoryController::new(store, remote),
        }
    }

    /// Load every list concurrently. Each failure is reported on its own.
    pub async fn load_all(&self, token: &CancelToken) {
        let _ = futures::join!(
            self.posts.load(token),
            self.learning_progress.load(token),
            self.skill_shares.load(token),
            self.stories.load(token),
        );
    }
}
