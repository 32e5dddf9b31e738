//! # Media upload gate
//!
//! Client-side admission control run before any file leaves the browser. Files
//! are checked in the order the user picked them:
//!
//! 1. the record may not exceed [`UploadPolicy::max_files`] (counting media
//!    already attached),
//! 2. the MIME major type must be one the policy allows,
//! 3. videos must measure at most [`UploadPolicy::max_video_secs`]; a video
//!    whose duration can not be read is refused as well.
//!
//! Admitted files are uploaded concurrently and the batch resolves only once
//! every upload has finished, so the caller applies one consistent result.
//! Each refused or failed file is reported on its own and posted to the store
//! as a warning notice; the rest of the batch is unaffected.
//!
//! This gate is a convenience for the user, not an enforcement point; the
//! backend has to apply the same limits.

use futures::future::join_all;
use thiserror::Error;

use crate::error::RemoteError;
use crate::models::{MediaItem, MediaKind};
use crate::duration::DurationSource;
use crate::remote::{MediaFile, Remote, UploadCategory};
use crate::state::{NoticeLevel, Store};

/// Limits for one kind of record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_files: usize,
    pub allow_video: bool,
    pub max_video_secs: u32,
}

impl UploadPolicy {
    /// Images and videos.
    pub fn media(max_files: usize, max_video_secs: u32) -> Self {
        Self {
            max_files,
            allow_video: true,
            max_video_secs,
        }
    }

    pub fn images_only(max_files: usize) -> Self {
        Self {
            max_files,
            allow_video: false,
            max_video_secs: 0,
        }
    }

    pub fn allows(&self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Image => true,
            MediaKind::Video => self.allow_video,
        }
    }

    /// Value for an `<input accept=...>` attribute.
    pub fn accept(&self) -> &'static str {
        if self.allow_video {
            "image/*,video/*"
        } else {
            "image/*"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum RejectReason {
    #[error("you can only upload up to {max} files in total")]
    TooMany { max: usize },
    #[error("{mime:?} is not an allowed image or video type")]
    UnsupportedType { mime: String },
    #[error("videos must be {max} seconds or less (this one is {secs:.0}s)")]
    VideoTooLong { secs: f64, max: u32 },
    #[error("could not read the video's duration")]
    UnknownDuration,
    #[error("upload failed: {0}")]
    UploadFailed(RemoteError),
}

/// A file left out of the batch.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
    pub file: String,
    pub reason: RejectReason,
}

impl Rejection {
    pub fn message(&self) -> String {
        format!("\"{}\": {}", self.file, self.reason)
    }
}

/// Outcome of one batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadReport {
    /// Uploaded media in the order the files were picked.
    pub uploaded: Vec<MediaItem>,
    pub rejected: Vec<Rejection>,
}

/// Split `files` into admitted and refused, without any network access.
pub async fn admit<P: DurationSource>(
    files: Vec<MediaFile>,
    existing: usize,
    policy: &UploadPolicy,
    durations: &P,
) -> (Vec<(MediaFile, MediaKind)>, Vec<Rejection>) {
    let mut admitted = Vec::new();
    let mut rejected = Vec::new();

    for file in files {
        let reason = if existing + admitted.len() >= policy.max_files {
            Some(RejectReason::TooMany {
                max: policy.max_files,
            })
        } else {
            match file.kind() {
                Some(kind) if policy.allows(kind) => {
                    if kind == MediaKind::Video {
                        check_video(&file, policy, durations).await
                    } else {
                        None
                    }
                }
                _ => Some(RejectReason::UnsupportedType {
                    mime: file.mime.clone(),
                }),
            }
        };

        match reason {
            Some(reason) => rejected.push(Rejection {
                file: file.name,
                reason,
            }),
            None => {
                if let Some(kind) = file.kind() {
                    admitted.push((file, kind));
                }
            }
        }
    }

    (admitted, rejected)
}

async fn check_video<P: DurationSource>(
    file: &MediaFile,
    policy: &UploadPolicy,
    durations: &P,
) -> Option<RejectReason> {
    match durations.duration_secs(file).await {
        Some(secs) if secs <= f64::from(policy.max_video_secs) => None,
        Some(secs) => Some(RejectReason::VideoTooLong {
            secs,
            max: policy.max_video_secs,
        }),
        None => Some(RejectReason::UnknownDuration),
    }
}

/// Runs the gate and the uploads for a form.
#[derive(Clone, Debug)]
pub struct Uploader<R, P> {
    store: Store,
    remote: R,
    durations: P,
}

impl<R: Remote, P: DurationSource> Uploader<R, P> {
    pub fn new(store: Store, remote: R, durations: P) -> Self {
        Self {
            store,
            remote,
            durations,
        }
    }

    /// Admit, upload and report one batch of picked files.
    ///
    /// `existing` is how many media items the record already carries.
    pub async fn upload_batch(
        &self,
        files: Vec<MediaFile>,
        existing: usize,
        policy: &UploadPolicy,
        category: UploadCategory,
    ) -> UploadReport {
        let (admitted, mut rejected) = admit(files, existing, policy, &self.durations).await;

        let outcomes = join_all(admitted.iter().map(|(file, _)| {
            self.remote.upload_file(file, category)
        }))
        .await;

        let mut uploaded = Vec::with_capacity(admitted.len());
        for ((file, kind), outcome) in admitted.into_iter().zip(outcomes) {
            match outcome {
                Ok(url) => uploaded.push(MediaItem {
                    url,
                    kind,
                    name: file.name,
                }),
                Err(e) => {
                    tracing::error!(file = %file.name, error = %e, "media upload failed");
                    rejected.push(Rejection {
                        file: file.name,
                        reason: RejectReason::UploadFailed(e),
                    });
                }
            }
        }

        self.report_rejections(&rejected);
        UploadReport { uploaded, rejected }
    }

    fn report_rejections(&self, rejected: &[Rejection]) {
        let mut too_many = 0;
        for rejection in rejected {
            tracing::warn!(file = %rejection.file, reason = %rejection.reason, "media rejected");
            match rejection.reason {
                RejectReason::TooMany { .. } => too_many += 1,
                _ => {
                    self.store.notify(NoticeLevel::Warning, rejection.message());
                }
            }
        }
        if let Some(RejectReason::TooMany { max }) = rejected
            .iter()
            .map(|r| &r.reason)
            .find(|r| matches!(r, RejectReason::TooMany { .. }))
        {
            let noun = if too_many == 1 { "file was" } else { "files were" };
            self.store.notify(
                NoticeLevel::Warning,
                format!("You can only upload up to {max} files in total; {too_many} {noun} not added."),
            );
        }
    }
}
