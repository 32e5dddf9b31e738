//! # Shared application state with path-scoped change notification
//!
//! [`Store`] is the single container for everything the feed UI observes: the
//! session user, every entity list, modal flags, the edit selection, per-item
//! delete flags, the active feed tab and pending notices. It is cheap to clone
//! (an `Arc` handle) and is threaded through the UI as context rather than
//! living in a global.
//!
//! ## Paths
//!
//! Each top-level slice of [`AppState`] has a marker type implementing
//! [`Path`], which ties a [`StorePath`] key to the slice's value type:
//!
//! ```ignore
//! store.write::<Posts>(posts);          // Vec<Post>
//! let open = store.read::<Modals>();    // ModalFlags
//! ```
//!
//! ## Reads
//!
//! [`Store::snapshot`] hands out an `Arc<AppState>`. Writers go through
//! `Arc::make_mut`, so a snapshot already handed out is never mutated and a
//! renderer can not observe a half-applied write.
//!
//! ## Change events
//!
//! [`Store::subscribe`] registers interest in a set of paths and returns a
//! [`Subscription`] stream. Every write yields a [`ChangeSet`] to the
//! subscriptions whose path set contains the written path. Dropping the
//! subscription unregisters it on the next write.

use std::collections::BTreeSet;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::Stream;

use crate::feed::FeedTab;
use crate::models::{Post, SkillShare, Story, User};

/// Key for one top-level slice of [`AppState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorePath {
    CurrentUser,
    Posts,
    LearningProgressList,
    SkillShares,
    Stories,
    Modals,
    SelectedLearningProgress,
    Deleting,
    ActiveTab,
    Notices,
}

/// The set of paths touched by a write.
pub type ChangeSet = BTreeSet<StorePath>;

/// Which modal dialogs are open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKind {
    CreatePost,
    CreateLearningProgress,
    EditLearningProgress,
    CreateSkillShare,
    CreateStory,
    Profile,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalFlags {
    pub create_post: bool,
    pub create_learning_progress: bool,
    pub edit_learning_progress: bool,
    pub create_skill_share: bool,
    pub create_story: bool,
    pub profile: bool,
}

impl ModalFlags {
    pub fn is_open(&self, kind: ModalKind) -> bool {
        *self.flag(kind)
    }

    pub fn set(&mut self, kind: ModalKind, open: bool) {
        *self.flag_mut(kind) = open;
    }

    fn flag(&self, kind: ModalKind) -> &bool {
        match kind {
            ModalKind::CreatePost => &self.create_post,
            ModalKind::CreateLearningProgress => &self.create_learning_progress,
            ModalKind::EditLearningProgress => &self.edit_learning_progress,
            ModalKind::CreateSkillShare => &self.create_skill_share,
            ModalKind::CreateStory => &self.create_story,
            ModalKind::Profile => &self.profile,
        }
    }

    fn flag_mut(&mut self, kind: ModalKind) -> &mut bool {
        match kind {
            ModalKind::CreatePost => &mut self.create_post,
            ModalKind::CreateLearningProgress => &mut self.create_learning_progress,
            ModalKind::EditLearningProgress => &mut self.edit_learning_progress,
            ModalKind::CreateSkillShare => &mut self.create_skill_share,
            ModalKind::CreateStory => &mut self.create_story,
            ModalKind::Profile => &mut self.profile,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Everything the UI observes.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub current_user: Option<User>,
    pub posts: Vec<Post>,
    pub learning_progress: Vec<crate::models::LearningProgress>,
    pub skill_shares: Vec<SkillShare>,
    pub stories: Vec<Story>,
    pub modals: ModalFlags,
    pub selected_learning_progress: Option<crate::models::LearningProgress>,
    /// Ids whose delete is in flight.
    pub deleting: BTreeSet<String>,
    pub active_tab: FeedTab,
    pub notices: Vec<Notice>,
}

/// A typed key into [`AppState`].
pub trait Path: 'static {
    type Value: Clone + 'static;
    const PATH: StorePath;

    fn get(state: &AppState) -> &Self::Value;
    fn get_mut(state: &mut AppState) -> &mut Self::Value;
}

macro_rules! paths {
    ($($(#[$meta:meta])* $name:ident => $field:ident : $ty:ty),* $(,)?) => {
        $(
            $(#[$meta])*
            pub struct $name;

            impl Path for $name {
                type Value = $ty;
                const PATH: StorePath = StorePath::$name;

                fn get(state: &AppState) -> &Self::Value {
                    &state.$field
                }

                fn get_mut(state: &mut AppState) -> &mut Self::Value {
                    &mut state.$field
                }
            }
        )*
    };
}

paths! {
    CurrentUser => current_user: Option<User>,
    Posts => posts: Vec<Post>,
    LearningProgressList => learning_progress: Vec<crate::models::LearningProgress>,
    SkillShares => skill_shares: Vec<SkillShare>,
    Stories => stories: Vec<Story>,
    Modals => modals: ModalFlags,
    /// Record pre-populating the learning progress edit form.
    SelectedLearningProgress => selected_learning_progress: Option<crate::models::LearningProgress>,
    Deleting => deleting: BTreeSet<String>,
    ActiveTab => active_tab: FeedTab,
    Notices => notices: Vec<Notice>,
}

/// An immutable point-in-time view of the store.
pub type Snapshot = Arc<AppState>;

struct Observer {
    paths: ChangeSet,
    tx: UnboundedSender<ChangeSet>,
}

#[derive(Default)]
struct Inner {
    state: Arc<AppState>,
    observers: Vec<Observer>,
}

impl Inner {
    /// Send `path` to every observer subscribed to it, pruning closed ones.
    fn publish(&mut self, path: StorePath) {
        let changed = ChangeSet::from([path]);
        self.observers.retain(|observer| {
            if observer.tx.is_closed() {
                return false;
            }
            if observer.paths.contains(&path) {
                return observer.tx.unbounded_send(changed.clone()).is_ok();
            }
            true
        });
    }
}

/// Shared, observable application state.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<Inner>>,
    next_notice: Arc<AtomicU64>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("state", &self.snapshot()).finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `state`.
    pub fn with_state(state: AppState) -> Self {
        let store = Self::default();
        store.lock().state = Arc::new(state);
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state as an immutable snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.lock().state)
    }

    /// Clone of the value at path `P`.
    pub fn read<P: Path>(&self) -> P::Value {
        P::get(&self.lock().state).clone()
    }

    /// Replace the value at path `P` and notify its observers.
    pub fn write<P: Path>(&self, value: P::Value) {
        self.update::<P, _>(|slot| *slot = value);
    }

    /// Mutate the value at path `P` in place and notify its observers.
    pub fn update<P: Path, T>(&self, f: impl FnOnce(&mut P::Value) -> T) -> T {
        let mut inner = self.lock();
        let out = f(P::get_mut(Arc::make_mut(&mut inner.state)));
        inner.publish(P::PATH);
        out
    }

    /// Replace the value at path `P` only if it differs from `value`.
    ///
    /// Returns `false`, and notifies no one, when the value was already equal.
    pub fn write_if_changed<P: Path>(&self, value: P::Value) -> bool
    where
        P::Value: PartialEq,
    {
        let mut inner = self.lock();
        if *P::get(&inner.state) == value {
            return false;
        }
        *P::get_mut(Arc::make_mut(&mut inner.state)) = value;
        inner.publish(P::PATH);
        true
    }

    /// Register interest in `paths`.
    pub fn subscribe(&self, paths: impl IntoIterator<Item = StorePath>) -> Subscription {
        let (tx, rx) = unbounded();
        self.lock().observers.push(Observer {
            paths: paths.into_iter().collect(),
            tx,
        });
        Subscription { rx }
    }

    /// Number of live subscriptions. Dropped ones are pruned on the next write.
    pub fn observer_count(&self) -> usize {
        self.lock()
            .observers
            .iter()
            .filter(|o| !o.tx.is_closed())
            .count()
    }

    pub fn current_user(&self) -> Option<User> {
        self.read::<CurrentUser>()
    }

    pub fn open_modal(&self, kind: ModalKind) {
        self.update::<Modals, _>(|m| m.set(kind, true));
    }

    pub fn close_modal(&self, kind: ModalKind) {
        self.update::<Modals, _>(|m| m.set(kind, false));
    }

    /// Queue a notice for the user and return its id.
    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let id = self.next_notice.fetch_add(1, Ordering::Relaxed) + 1;
        let message = message.into();
        self.update::<Notices, _>(|n| n.push(Notice { id, level, message }));
        id
    }

    pub fn dismiss_notice(&self, id: u64) {
        self.update::<Notices, _>(|n| n.retain(|notice| notice.id != id));
    }
}

/// Stream of change sets for one observer.
pub struct Subscription {
    rx: UnboundedReceiver<ChangeSet>,
}

impl Subscription {
    /// Drain every change set already delivered, merged into one.
    pub fn try_drain(&mut self) -> Option<ChangeSet> {
        let mut merged: Option<ChangeSet> = None;
        while let Ok(set) = self.rx.try_recv() {
            merged.get_or_insert_with(ChangeSet::new).extend(set);
        }
        merged
    }
}

impl Stream for Subscription {
    type Item = ChangeSet;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;
    use futures::StreamExt;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            user_id: "u1".to_string(),
            content_description: format!("post {id}"),
            media_link: format!("https://cdn/{id}.png"),
            media_type: MediaKind::Image,
        }
    }

    #[test]
    fn test_write_then_read() {
        let store = Store::new();
        assert!(store.read::<Posts>().is_empty());

        store.write::<Posts>(vec![post("a"), post("b")]);
        let posts = store.read::<Posts>();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].id, "b");
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let store = Store::new();
        store.write::<Posts>(vec![post("a")]);

        let before = store.snapshot();
        store.write::<Posts>(vec![post("b"), post("c")]);

        assert_eq!(before.posts.len(), 1);
        assert_eq!(before.posts[0].id, "a");
        assert_eq!(store.snapshot().posts.len(), 2);
    }

    #[test]
    fn test_subscriber_only_sees_its_paths() {
        let store = Store::new();
        let mut posts_sub = store.subscribe([StorePath::Posts]);
        let mut modal_sub = store.subscribe([StorePath::Modals, StorePath::Notices]);

        store.write::<Posts>(vec![post("a")]);

        assert_eq!(posts_sub.try_drain(), Some(ChangeSet::from([StorePath::Posts])));
        assert_eq!(modal_sub.try_drain(), None);

        store.open_modal(ModalKind::CreatePost);
        store.notify(NoticeLevel::Info, "hello");

        assert_eq!(posts_sub.try_drain(), None);
        assert_eq!(
            modal_sub.try_drain(),
            Some(ChangeSet::from([StorePath::Modals, StorePath::Notices]))
        );
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let store = Store::new();
        let sub = store.subscribe([StorePath::Posts]);
        let _keep = store.subscribe([StorePath::Posts]);
        assert_eq!(store.observer_count(), 2);

        drop(sub);
        store.write::<Posts>(Vec::new());
        assert_eq!(store.observer_count(), 1);
    }

    #[test]
    fn test_try_drain_merges_pending_changes() {
        let store = Store::new();
        let mut sub = store.subscribe([StorePath::Posts, StorePath::Deleting]);

        store.write::<Posts>(vec![post("a")]);
        store.update::<Deleting, _>(|d| d.insert("a".to_string()));
        store.write::<Posts>(Vec::new());

        assert_eq!(
            sub.try_drain(),
            Some(ChangeSet::from([StorePath::Posts, StorePath::Deleting]))
        );
        assert_eq!(sub.try_drain(), None);
    }

    #[test]
    fn test_write_if_changed_skips_equal_values() {
        let store = Store::new();
        let mut sub = store.subscribe([StorePath::ActiveTab]);

        assert!(!store.write_if_changed::<ActiveTab>(FeedTab::Posts));
        assert_eq!(sub.try_drain(), None);

        assert!(store.write_if_changed::<ActiveTab>(FeedTab::Friends));
        assert_eq!(sub.try_drain(), Some(ChangeSet::from([StorePath::ActiveTab])));
        assert_eq!(store.read::<ActiveTab>(), FeedTab::Friends);
    }

    #[tokio::test]
    async fn test_subscription_stream_wakes_on_write() {
        let store = Store::new();
        let mut sub = store.subscribe([StorePath::ActiveTab]);

        store.write::<ActiveTab>(FeedTab::SkillShares);

        let changed = sub.next().await.unwrap();
        assert!(changed.contains(&StorePath::ActiveTab));
        assert_eq!(store.read::<ActiveTab>(), FeedTab::SkillShares);
    }

    #[test]
    fn test_modal_flags_and_notices() {
        let store = Store::new();
        store.open_modal(ModalKind::CreateSkillShare);
        assert!(store.read::<Modals>().is_open(ModalKind::CreateSkillShare));
        assert!(!store.read::<Modals>().is_open(ModalKind::CreatePost));

        store.close_modal(ModalKind::CreateSkillShare);
        assert_eq!(store.read::<Modals>(), ModalFlags::default());

        let first = store.notify(NoticeLevel::Success, "saved");
        let second = store.notify(NoticeLevel::Error, "failed");
        assert_ne!(first, second);
        store.dismiss_notice(first);

        let notices = store.read::<Notices>();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "failed");
    }
}
