//! # Client configuration: `learnloop.toml`
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"   # empty = offline demo backend
//! timeout_secs = 30
//!
//! [media]
//! max_files_per_record = 3               # 1..=3, larger values are capped
//! max_video_secs = 30
//! ```
//!
//! Every field has a default, so a missing or empty file is the default
//! configuration.

use serde::{Deserialize, Serialize};

use crate::upload::UploadPolicy;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnLoopConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST base URL. Empty selects the in-memory backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (native targets only).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Client-side media limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_max_files")]
    pub max_files_per_record: usize,
    #[serde(default = "default_max_video_secs")]
    pub max_video_secs: u32,
}

/// Hard cap on attachments per record, whatever the config says.
pub const MAX_FILES_PER_RECORD: usize = 3;

fn default_max_files() -> usize {
    MAX_FILES_PER_RECORD
}

fn default_max_video_secs() -> u32 {
    30
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_files_per_record: default_max_files(),
            max_video_secs: default_max_video_secs(),
        }
    }
}

impl MediaConfig {
    /// Configured attachment limit, kept within `1..=MAX_FILES_PER_RECORD`.
    pub fn max_files(&self) -> usize {
        self.max_files_per_record.clamp(1, MAX_FILES_PER_RECORD)
    }

    /// Skill shares: several images or videos.
    pub fn skill_share_policy(&self) -> UploadPolicy {
        UploadPolicy::media(self.max_files(), self.max_video_secs)
    }

    /// Posts: one image or video.
    pub fn post_policy(&self) -> UploadPolicy {
        UploadPolicy::media(1, self.max_video_secs)
    }

    /// Stories: one image.
    pub fn story_policy(&self) -> UploadPolicy {
        UploadPolicy::images_only(1)
    }
}

impl LearnLoopConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "learnloop.toml"
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    /// Whether the offline in-memory backend should be used.
    pub fn is_offline(&self) -> bool {
        self.api.base_url.trim().is_empty()
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = LearnLoopConfig::from_toml("").unwrap();
        assert_eq!(config, LearnLoopConfig::default());
        assert_eq!(config.media.max_files_per_record, 3);
        assert_eq!(config.media.max_video_secs, 30);
        assert!(!config.is_offline());
    }

    #[test]
    fn test_partial_sections() {
        let config = LearnLoopConfig::from_toml(
            r#"
            [api]
            base_url = ""

            [media]
            max_video_secs = 15
            "#,
        )
        .unwrap();
        assert!(config.is_offline());
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.media.max_files_per_record, 3);
        assert_eq!(config.media.skill_share_policy().max_video_secs, 15);
    }

    #[test]
    fn test_media_limit_is_capped() {
        let config = LearnLoopConfig::from_toml("[media]\nmax_files_per_record = 5").unwrap();
        assert_eq!(config.media.max_files_per_record, 5);
        assert_eq!(config.media.max_files(), MAX_FILES_PER_RECORD);
        assert_eq!(config.media.skill_share_policy().max_files, MAX_FILES_PER_RECORD);

        let config = LearnLoopConfig::from_toml("[media]\nmax_files_per_record = 0").unwrap();
        assert_eq!(config.media.max_files(), 1);

        let config = LearnLoopConfig::from_toml("[media]\nmax_files_per_record = 2").unwrap();
        assert_eq!(config.media.skill_share_policy().max_files, 2);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = LearnLoopConfig::default().with_base_url("https://learnloop.example/api");
        let text = config.to_toml().unwrap();
        assert_eq!(LearnLoopConfig::from_toml(&text).unwrap(), config);
    }
}
