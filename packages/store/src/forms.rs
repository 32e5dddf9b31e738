//! # Form state and local validation
//!
//! Each create/edit modal keeps one of these structs as its local field state.
//! `validate` turns the fields into the remote payload or returns
//! [`FieldErrors`] keyed by field name; nothing here touches the network.
//! `clear` resets the form after a successful submit.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{
    Intensity, LearningProgress, MediaItem, NewLearningProgress, NewPost, NewSkillShare, NewStory,
    StoryCategory, MAX_STORY_MINUTES,
};

/// Validation messages keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Add `message` when `value` is blank.
    pub fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(value)` when no field failed.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for message in self.0.values() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostForm {
    pub content_description: String,
    /// The uploaded attachment; a post needs exactly one.
    pub media: Option<MediaItem>,
}

impl PostForm {
    pub fn validate(&self, user_id: &str) -> Result<NewPost, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require(
            "content_description",
            &self.content_description,
            "Please enter content description",
        );
        let Some(media) = &self.media else {
            errors.add("media", "Please upload an image or video");
            return Err(errors);
        };
        errors.into_result(|| NewPost {
            user_id: user_id.to_string(),
            content_description: self.content_description.trim().to_string(),
            media_link: media.url.clone(),
            media_type: media.kind,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LearningProgressForm {
    pub plan_name: String,
    pub description: String,
    /// Tutorials and resources used.
    pub goal: String,
    /// Skills acquired, comma separated.
    pub routines: String,
}

impl LearningProgressForm {
    /// Form pre-populated from an existing record for editing.
    pub fn from_record(record: &LearningProgress) -> Self {
        Self {
            plan_name: record.plan_name.clone(),
            description: record.description.clone(),
            goal: record.goal.clone(),
            routines: record.routines.clone(),
        }
    }

    pub fn validate(&self, user_id: &str) -> Result<NewLearningProgress, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("plan_name", &self.plan_name, "Please add a title");
        errors.require("description", &self.description, "Please enter description");
        errors.require("goal", &self.goal, "Please enter tutorials");
        errors.require("routines", &self.routines, "Please enter Skills");
        errors.into_result(|| NewLearningProgress {
            user_id: user_id.to_string(),
            plan_name: self.plan_name.trim().to_string(),
            description: self.description.trim().to_string(),
            goal: self.goal.trim().to_string(),
            routines: self.routines.trim().to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillShareForm {
    pub description: String,
    pub media: Vec<MediaItem>,
}

impl SkillShareForm {
    pub fn validate(&self, user_id: &str, max_media: usize) -> Result<NewSkillShare, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require(
            "description",
            &self.description,
            "Please share details about your skills",
        );
        if self.media.is_empty() {
            errors.add("media", "Please upload at least one media file");
        } else if self.media.len() > max_media {
            errors.add(
                "media",
                format!("You can only upload up to {max_media} files in total"),
            );
        }
        errors.into_result(|| {
            NewSkillShare::new(
                user_id.to_string(),
                self.description.trim().to_string(),
                &self.media,
            )
        })
    }

    /// Slots left before `max_media` is reached.
    pub fn remaining_slots(&self, max_media: usize) -> usize {
        max_media.saturating_sub(self.media.len())
    }

    pub fn remove_media(&mut self, url: &str) {
        self.media.retain(|m| m.url != url);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Default story length in minutes.
pub const DEFAULT_STORY_MINUTES: u32 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoryForm {
    pub title: String,
    /// Start date, `YYYY-MM-DD`.
    pub timestamp: Option<String>,
    pub exercise_type: String,
    pub category: Option<StoryCategory>,
    pub description: String,
    pub time_duration: u32,
    pub intensity: Option<Intensity>,
    pub image: Option<String>,
}

impl Default for StoryForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            timestamp: None,
            exercise_type: String::new(),
            category: None,
            description: String::new(),
            time_duration: DEFAULT_STORY_MINUTES,
            intensity: None,
            image: None,
        }
    }
}

impl StoryForm {
    pub fn validate(&self, user_id: &str) -> Result<NewStory, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "Please input a title");
        if self.time_duration > MAX_STORY_MINUTES {
            errors.add(
                "time_duration",
                format!("Duration must be between 0 and {MAX_STORY_MINUTES} minutes"),
            );
        }
        errors.into_result(|| NewStory {
            user_id: user_id.to_string(),
            title: self.title.trim().to_string(),
            timestamp: self.timestamp.clone().filter(|t| !t.trim().is_empty()),
            exercise_type: self.exercise_type.trim().to_string(),
            category: self.category,
            description: self.description.trim().to_string(),
            time_duration: self.time_duration,
            intensity: self.intensity,
            image: self.image.clone(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
