//! # Remote boundary
//!
//! [`Remote`] is the async interface the controllers use to reach the backend.
//! Every method is fallible and every `list_*` call is an idempotent re-read of
//! the latest committed state. Implementations: [`crate::MemoryRemote`] for tests
//! and offline use, and the REST client in the `api` crate.
//!
//! The futures are not required to be `Send`; in the browser everything runs on
//! the single event-loop thread.

use std::future::Future;

use crate::error::RemoteError;
use crate::models::{
    LearningProgress, MediaKind, NewLearningProgress, NewPost, NewSkillShare, NewStory, Post,
    SkillShare, Story,
};

/// A file picked by the user, read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Image or video, from the MIME major type.
    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_mime(&self.mime)
    }
}

/// Storage bucket an upload lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadCategory {
    Posts,
    Stories,
}

impl UploadCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Stories => "workoutStories",
        }
    }
}

/// Async access to the LearnLoop backend.
pub trait Remote {
    fn list_posts(&self) -> impl Future<Output = Result<Vec<Post>, RemoteError>>;
    fn create_post(&self, input: &NewPost) -> impl Future<Output = Result<Post, RemoteError>>;
    fn delete_post(&self, id: &str) -> impl Future<Output = Result<(), RemoteError>>;

    fn list_learning_progress(
        &self,
    ) -> impl Future<Output = Result<Vec<LearningProgress>, RemoteError>>;
    fn create_learning_progress(
        &self,
        input: &NewLearningProgress,
    ) -> impl Future<Output = Result<LearningProgress, RemoteError>>;
    fn update_learning_progress(
        &self,
        id: &str,
        input: &NewLearningProgress,
    ) -> impl Future<Output = Result<LearningProgress, RemoteError>>;
    fn delete_learning_progress(&self, id: &str) -> impl Future<Output = Result<(), RemoteError>>;

    fn list_skill_shares(&self) -> impl Future<Output = Result<Vec<SkillShare>, RemoteError>>;
    fn create_skill_share(
        &self,
        input: &NewSkillShare,
    ) -> impl Future<Output = Result<SkillShare, RemoteError>>;
    fn delete_skill_share(&self, id: &str) -> impl Future<Output = Result<(), RemoteError>>;

    fn list_stories(&self) -> impl Future<Output = Result<Vec<Story>, RemoteError>>;
    fn create_story(&self, input: &NewStory) -> impl Future<Output = Result<Story, RemoteError>>;

    /// Store `file` and return its public URL.
    fn upload_file(
        &self,
        file: &MediaFile,
        category: UploadCategory,
    ) -> impl Future<Output = Result<String, RemoteError>>;
}
