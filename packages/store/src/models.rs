//! # Domain models for the LearnLoop feed
//!
//! Plain records exchanged with the remote service and held in the
//! [`crate::Store`]. All types are `Serialize + Deserialize` and use the
//! backend's camelCase field names on the wire.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The signed-in session user. |
//! | [`Post`] | A feed post with a single image or video attachment. |
//! | [`LearningProgress`] | A learning plan update, editable only by its owner. |
//! | [`SkillShare`] | A skill description with up to three media items. |
//! | [`Story`] | A short learning-plan story shown in the story strip. |
//!
//! The `New*` structs are the create/update payloads sent to the remote.

use serde::{Deserialize, Serialize};

/// Progress shown for a plan that does not track completed items yet.
pub const PLACEHOLDER_PROGRESS_PERCENT: u8 = 25;

/// The session user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub authenticated: bool,
}

impl User {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            image: None,
            authenticated: true,
        }
    }
}

/// Anything with an owning user.
pub trait Owned {
    fn owner_id(&self) -> &str;

    /// Whether `user` may edit or delete this record.
    fn is_owned_by(&self, user: Option<&User>) -> bool {
        user.is_some_and(|u| u.uid == self.owner_id())
    }
}

/// Media category of an attachment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME type by its major type ("image/png" -> Image).
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.split('/').next()?.trim() {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// An uploaded attachment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
    /// Display name (the original file name where known).
    pub name: String,
}

impl MediaItem {
    /// Build an item whose display name is the last segment of the URL path.
    pub fn from_url(url: impl Into<String>, kind: MediaKind) -> Self {
        let url = url.into();
        let name = url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .unwrap_or_default()
            .to_string();
        Self { url, kind, name }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub content_description: String,
    #[serde(default)]
    pub media_link: String,
    pub media_type: MediaKind,
}

impl Owned for Post {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: String,
    pub content_description: String,
    pub media_link: String,
    pub media_type: MediaKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgress {
    pub id: String,
    pub user_id: String,
    pub plan_name: String,
    #[serde(default)]
    pub description: String,
    /// Tutorials and resources used.
    #[serde(default)]
    pub goal: String,
    /// Comma-delimited skills acquired.
    #[serde(default)]
    pub routines: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub completed_items: Option<u32>,
    #[serde(default)]
    pub total_items: Option<u32>,
}

impl LearningProgress {
    /// Skills parsed from the comma-delimited `routines` field.
    pub fn skills(&self) -> Vec<&str> {
        self.routines
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Completion as a whole percentage in `0..=100`.
    pub fn progress_percent(&self) -> u8 {
        match (self.completed_items, self.total_items) {
            (Some(done), Some(total)) if done > 0 && total > 0 => {
                let pct = (u64::from(done) * 100 + u64::from(total) / 2) / u64::from(total);
                pct.min(100) as u8
            }
            _ => PLACEHOLDER_PROGRESS_PERCENT,
        }
    }
}

impl Owned for LearningProgress {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLearningProgress {
    pub user_id: String,
    pub plan_name: String,
    pub description: String,
    pub goal: String,
    pub routines: String,
}

/// Skill share as stored by the backend: parallel url/type arrays.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SkillShareWire {
    #[serde(default)]
    id: String,
    user_id: String,
    #[serde(default, rename = "mealDetails")]
    description: String,
    #[serde(default)]
    media_urls: Vec<String>,
    #[serde(default)]
    media_types: Vec<MediaKind>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "SkillShareWire", into = "SkillShareWire")]
pub struct SkillShare {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub media: Vec<MediaItem>,
}

impl From<SkillShareWire> for SkillShare {
    fn from(wire: SkillShareWire) -> Self {
        let media = wire
            .media_urls
            .into_iter()
            .zip(wire.media_types)
            .map(|(url, kind)| MediaItem::from_url(url, kind))
            .collect();
        Self {
            id: wire.id,
            user_id: wire.user_id,
            description: wire.description,
            media,
        }
    }
}

impl From<SkillShare> for SkillShareWire {
    fn from(share: SkillShare) -> Self {
        let (media_urls, media_types) = share.media.into_iter().map(|m| (m.url, m.kind)).unzip();
        Self {
            id: share.id,
            user_id: share.user_id,
            description: share.description,
            media_urls,
            media_types,
        }
    }
}

impl Owned for SkillShare {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkillShare {
    pub user_id: String,
    #[serde(rename = "mealDetails")]
    pub description: String,
    pub media_urls: Vec<String>,
    pub media_types: Vec<MediaKind>,
}

impl NewSkillShare {
    pub fn new(user_id: String, description: String, media: &[MediaItem]) -> Self {
        Self {
            user_id,
            description,
            media_urls: media.iter().map(|m| m.url.clone()).collect(),
            media_types: media.iter().map(|m| m.kind).collect(),
        }
    }
}

/// Audience level of a story.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryCategory {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl StoryCategory {
    pub const ALL: [Self; 4] = [Self::Beginner, Self::Intermediate, Self::Advanced, Self::Expert];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// Effort level of a story.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    #[serde(rename = "No Efforts")]
    None,
    #[serde(rename = "Mid Efforts")]
    Mid,
    #[serde(rename = "Moderate Efforts")]
    Moderate,
    #[serde(rename = "Severe Efforts")]
    Severe,
    #[serde(rename = "Maximal Efforts")]
    Maximal,
}

impl Intensity {
    pub const ALL: [Self; 5] = [Self::None, Self::Mid, Self::Moderate, Self::Severe, Self::Maximal];

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No Efforts",
            Self::Mid => "Mid Efforts",
            Self::Moderate => "Moderate Efforts",
            Self::Severe => "Severe Efforts",
            Self::Maximal => "Maximal Efforts",
        }
    }
}

/// Longest story duration the form accepts, in minutes.
pub const MAX_STORY_MINUTES: u32 = 120;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub exercise_type: String,
    #[serde(default)]
    pub category: Option<StoryCategory>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time_duration: u32,
    #[serde(default)]
    pub intensity: Option<Intensity>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Owned for Story {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStory {
    pub user_id: String,
    pub title: String,
    pub timestamp: Option<String>,
    pub exercise_type: String,
    pub category: Option<StoryCategory>,
    pub description: String,
    pub time_duration: u32,
    pub intensity: Option<Intensity>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(routines: &str, done: Option<u32>, total: Option<u32>) -> LearningProgress {
        LearningProgress {
            id: "lp-1".to_string(),
            user_id: "u1".to_string(),
            plan_name: "Rust".to_string(),
            description: String::new(),
            goal: String::new(),
            routines: routines.to_string(),
            category: None,
            last_updated: None,
            completed_items: done,
            total_items: total,
        }
    }

    #[test]
    fn test_skills_are_trimmed_and_skip_blanks() {
        let p = plan(" traits, lifetimes ,, async ", None, None);
        assert_eq!(p.skills(), vec!["traits", "lifetimes", "async"]);
        assert!(plan("", None, None).skills().is_empty());
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(plan("", Some(1), Some(3)).progress_percent(), 33);
        assert_eq!(plan("", Some(2), Some(3)).progress_percent(), 67);
        assert_eq!(plan("", Some(5), Some(4)).progress_percent(), 100);
        assert_eq!(plan("", None, Some(4)).progress_percent(), PLACEHOLDER_PROGRESS_PERCENT);
        assert_eq!(plan("", Some(0), Some(4)).progress_percent(), PLACEHOLDER_PROGRESS_PERCENT);
        assert_eq!(plan("", Some(3), Some(0)).progress_percent(), PLACEHOLDER_PROGRESS_PERCENT);
    }

    #[test]
    fn test_ownership() {
        let p = plan("", None, None);
        assert!(p.is_owned_by(Some(&User::new("u1"))));
        assert!(!p.is_owned_by(Some(&User::new("u2"))));
        assert!(!p.is_owned_by(None));
    }

    #[test]
    fn test_media_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("video/mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("application/pdf"), None);
        assert_eq!(MediaKind::from_mime(""), None);
    }

    #[test]
    fn test_skill_share_reads_backend_shape() {
        let json = r#"{
            "id": "s1",
            "userId": "u1",
            "mealDetails": "Knife skills",
            "mediaUrls": ["https://cdn/x/a.png?t=1", "https://cdn/x/b.mp4"],
            "mediaTypes": ["image", "video"]
        }"#;
        let share: SkillShare = serde_json::from_str(json).unwrap();
        assert_eq!(share.description, "Knife skills");
        assert_eq!(share.media.len(), 2);
        assert_eq!(share.media[0].name, "a.png");
        assert_eq!(share.media[1].kind, MediaKind::Video);

        let back = serde_json::to_value(&share).unwrap();
        assert_eq!(back["mealDetails"], "Knife skills");
        assert_eq!(back["mediaTypes"][1], "video");
    }

    #[test]
    fn test_story_intensity_uses_display_labels() {
        let json = serde_json::to_string(&Intensity::Moderate).unwrap();
        assert_eq!(json, "\"Moderate Efforts\"");
        assert_eq!(StoryCategory::from_label("Expert"), Some(StoryCategory::Expert));
        assert_eq!(StoryCategory::from_label("Guru"), None);
    }
}
