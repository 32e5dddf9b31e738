//! Headless core of the LearnLoop client: the observable store, the remote
//! boundary, form validation, the media upload gate and the sync-on-write
//! controllers. Nothing in here depends on a UI toolkit.

pub mod cancel;
pub mod config;
pub mod controller;
pub mod duration;
pub mod error;
pub mod feed;
pub mod forms;
pub mod models;
pub mod remote;
pub mod state;
pub mod upload;

mod memory;
pub use memory::{MemoryRemote, Op};

pub use cancel::CancelToken;
pub use config::LearnLoopConfig;
pub use controller::{
    Controllers, LearningProgressController, PostController, SkillShareController,
    StoryController,
};
pub use duration::{DurationSource, Mp4Duration};
pub use error::{RemoteError, SubmitError};
pub use feed::{select_tab, FeedTab};
pub use forms::{FieldErrors, LearningProgressForm, PostForm, SkillShareForm, StoryForm};
pub use models::{
    LearningProgress, MediaItem, MediaKind, Owned, Post, SkillShare, Story, User,
};
pub use remote::{MediaFile, Remote, UploadCategory};
pub use state::{AppState, ChangeSet, Path, Snapshot, Store, StorePath, Subscription};
pub use upload::{RejectReason, Rejection, UploadPolicy, UploadReport, Uploader};
