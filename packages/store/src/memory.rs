use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::RemoteError;
use crate::models::{
    LearningProgress, NewLearningProgress, NewPost, NewSkillShare, NewStory, Post, SkillShare,
    Story,
};
use crate::remote::{MediaFile, Remote, UploadCategory};

/// Remote operations, for call accounting and failure injection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    ListPosts,
    CreatePost,
    DeletePost,
    ListLearningProgress,
    CreateLearningProgress,
    UpdateLearningProgress,
    DeleteLearningProgress,
    ListSkillShares,
    CreateSkillShare,
    DeleteSkillShare,
    ListStories,
    CreateStory,
    UploadFile,
}

#[derive(Debug, Default)]
struct Data {
    posts: Vec<Post>,
    learning_progress: Vec<LearningProgress>,
    skill_shares: Vec<SkillShare>,
    stories: Vec<Story>,
    uploads: Vec<(String, UploadCategory)>,
    calls: Vec<Op>,
    fail_next: HashSet<Op>,
    fail_uploads: HashSet<String>,
    next_id: u64,
}

impl Data {
    fn enter(&mut self, op: Op) -> Result<(), RemoteError> {
        self.calls.push(op);
        if self.fail_next.remove(&op) {
            return Err(RemoteError::Status {
                status: 500,
                message: format!("injected failure for {op:?}"),
            });
        }
        Ok(())
    }

    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// In-memory [`Remote`] for testing and the offline demo.
#[derive(Clone, Debug, Default)]
pub struct MemoryRemote {
    data: Arc<Mutex<Data>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Data> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next call to `op` fail with a 500.
    pub fn fail_next(&self, op: Op) {
        self.lock().fail_next.insert(op);
    }

    /// Make every upload of a file called `name` fail.
    pub fn fail_upload_of(&self, name: &str) {
        self.lock().fail_uploads.insert(name.to_string());
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Op> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, op: Op) -> usize {
        self.lock().calls.iter().filter(|c| **c == op).count()
    }

    /// Names of successfully uploaded files, in completion order.
    pub fn uploaded(&self) -> Vec<String> {
        self.lock().uploads.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn seed_posts(&self, posts: Vec<Post>) {
        self.lock().posts = posts;
    }

    pub fn seed_learning_progress(&self, items: Vec<LearningProgress>) {
        self.lock().learning_progress = items;
    }

    pub fn seed_skill_shares(&self, items: Vec<SkillShare>) {
        self.lock().skill_shares = items;
    }

    pub fn seed_stories(&self, items: Vec<Story>) {
        self.lock().stories = items;
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &str) -> Result<(), RemoteError> {
    let before = items.len();
    items.retain(|item| key(item) != id);
    if items.len() == before {
        return Err(RemoteError::NotFound(id.to_string()));
    }
    Ok(())
}

impl Remote for MemoryRemote {
    async fn list_posts(&self) -> Result<Vec<Post>, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::ListPosts)?;
        Ok(data.posts.clone())
    }

    async fn create_post(&self, input: &NewPost) -> Result<Post, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::CreatePost)?;
        let post = Post {
            id: data.id("post"),
            user_id: input.user_id.clone(),
            content_description: input.content_description.clone(),
            media_link: input.media_link.clone(),
            media_type: input.media_type,
        };
        data.posts.insert(0, post.clone());
        Ok(post)
    }

    async fn delete_post(&self, id: &str) -> Result<(), RemoteError> {
        let mut data = self.lock();
        data.enter(Op::DeletePost)?;
        remove_by_id(&mut data.posts, id, |p| p.id.as_str())
    }

    async fn list_learning_progress(&self) -> Result<Vec<LearningProgress>, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::ListLearningProgress)?;
        Ok(data.learning_progress.clone())
    }

    async fn create_learning_progress(
        &self,
        input: &NewLearningProgress,
    ) -> Result<LearningProgress, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::CreateLearningProgress)?;
        let record = LearningProgress {
            id: data.id("lp"),
            user_id: input.user_id.clone(),
            plan_name: input.plan_name.clone(),
            description: input.description.clone(),
            goal: input.goal.clone(),
            routines: input.routines.clone(),
            category: None,
            last_updated: None,
            completed_items: None,
            total_items: None,
        };
        data.learning_progress.push(record.clone());
        Ok(record)
    }

    async fn update_learning_progress(
        &self,
        id: &str,
        input: &NewLearningProgress,
    ) -> Result<LearningProgress, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::UpdateLearningProgress)?;
        let record = data
            .learning_progress
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        record.plan_name = input.plan_name.clone();
        record.description = input.description.clone();
        record.goal = input.goal.clone();
        record.routines = input.routines.clone();
        Ok(record.clone())
    }

    async fn delete_learning_progress(&self, id: &str) -> Result<(), RemoteError> {
        let mut data = self.lock();
        data.enter(Op::DeleteLearningProgress)?;
        remove_by_id(&mut data.learning_progress, id, |r| r.id.as_str())
    }

    async fn list_skill_shares(&self) -> Result<Vec<SkillShare>, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::ListSkillShares)?;
        Ok(data.skill_shares.clone())
    }

    async fn create_skill_share(&self, input: &NewSkillShare) -> Result<SkillShare, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::CreateSkillShare)?;
        let media = input
            .media_urls
            .iter()
            .zip(&input.media_types)
            .map(|(url, kind)| crate::models::MediaItem::from_url(url.clone(), *kind))
            .collect();
        let share = SkillShare {
            id: data.id("skill"),
            user_id: input.user_id.clone(),
            description: input.description.clone(),
            media,
        };
        data.skill_shares.push(share.clone());
        Ok(share)
    }

    async fn delete_skill_share(&self, id: &str) -> Result<(), RemoteError> {
        let mut data = self.lock();
        data.enter(Op::DeleteSkillShare)?;
        remove_by_id(&mut data.skill_shares, id, |s| s.id.as_str())
    }

    async fn list_stories(&self) -> Result<Vec<Story>, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::ListStories)?;
        Ok(data.stories.clone())
    }

    async fn create_story(&self, input: &NewStory) -> Result<Story, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::CreateStory)?;
        let story = Story {
            id: data.id("story"),
            user_id: input.user_id.clone(),
            title: input.title.clone(),
            timestamp: input.timestamp.clone(),
            exercise_type: input.exercise_type.clone(),
            category: input.category,
            description: input.description.clone(),
            time_duration: input.time_duration,
            intensity: input.intensity,
            image: input.image.clone(),
        };
        data.stories.insert(0, story.clone());
        Ok(story)
    }

    async fn upload_file(
        &self,
        file: &MediaFile,
        category: UploadCategory,
    ) -> Result<String, RemoteError> {
        let mut data = self.lock();
        data.enter(Op::UploadFile)?;
        if data.fail_uploads.contains(&file.name) {
            return Err(RemoteError::Transport(format!("upload of {} interrupted", file.name)));
        }
        data.uploads.push((file.name.clone(), category));
        Ok(format!("memory://{}/{}", category.as_str(), file.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaKind;
    use std::collections::HashMap;

    /// Count of records per collection.
    fn collection_sizes(remote: &MemoryRemote) -> HashMap<&'static str, usize> {
        let data = remote.lock();
        HashMap::from([
            ("posts", data.posts.len()),
            ("learning_progress", data.learning_progress.len()),
            ("skill_shares", data.skill_shares.len()),
            ("stories", data.stories.len()),
        ])
    }

    fn new_post(text: &str) -> NewPost {
        NewPost {
            user_id: "u1".to_string(),
            content_description: text.to_string(),
            media_link: "https://cdn/a.png".to_string(),
            media_type: MediaKind::Image,
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let remote = MemoryRemote::new();
        assert!(remote.list_posts().await.unwrap().is_empty());

        let created = remote.create_post(&new_post("first")).await.unwrap();
        remote.create_post(&new_post("second")).await.unwrap();

        let posts = remote.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].content_description, "second");
        assert_eq!(posts[1].id, created.id);
    }

    #[tokio::test]
    async fn test_injected_failure_is_one_shot() {
        let remote = MemoryRemote::new();
        remote.fail_next(Op::CreatePost);

        assert!(remote.create_post(&new_post("x")).await.is_err());
        assert!(remote.create_post(&new_post("x")).await.is_ok());
        assert_eq!(remote.call_count(Op::CreatePost), 2);
        assert_eq!(collection_sizes(&remote)["posts"], 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let remote = MemoryRemote::new();
        let err = remote.delete_learning_progress("missing").await.unwrap_err();
        assert_eq!(err, RemoteError::NotFound("missing".to_string()));
    }

    #[tokio::test]
    async fn test_upload_returns_url_per_category() {
        let remote = MemoryRemote::new();
        let file = MediaFile::new("cover.png", "image/png", vec![1, 2, 3]);
        let url = remote.upload_file(&file, UploadCategory::Stories).await.unwrap();
        assert_eq!(url, "memory://workoutStories/cover.png");
        assert_eq!(remote.uploaded(), vec!["cover.png".to_string()]);

        remote.fail_upload_of("cover.png");
        assert!(remote.upload_file(&file, UploadCategory::Posts).await.is_err());
    }
}
