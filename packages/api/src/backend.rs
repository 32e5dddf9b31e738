//! Backend selection: the REST client, or the in-memory remote when no base URL
//! is configured.

use store::models::{
    LearningProgress, NewLearningProgress, NewPost, NewSkillShare, NewStory, Post, SkillShare,
    Story,
};
use store::{LearnLoopConfig, MediaFile, MemoryRemote, Remote, RemoteError, UploadCategory};

use crate::client::ApiClient;

#[derive(Clone, Debug)]
pub enum Backend {
    Http(ApiClient),
    Memory(MemoryRemote),
}

impl Backend {
    /// Backend described by `config`. Falls back to memory when the HTTP client
    /// can not be built.
    pub fn from_config(config: &LearnLoopConfig) -> Self {
        if config.is_offline() {
            tracing::info!("no API base URL configured, using the in-memory backend");
            return Self::Memory(MemoryRemote::new());
        }
        match ApiClient::new(&config.api) {
            Ok(client) => {
                tracing::info!(base_url = client.base_url(), "using REST backend");
                Self::Http(client)
            }
            Err(e) => {
                tracing::error!(error = %e, "could not build HTTP client, using the in-memory backend");
                Self::Memory(MemoryRemote::new())
            }
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Memory(_))
    }
}

macro_rules! delegate {
    ($self:ident, $remote:ident => $call:expr) => {
        match $self {
            Backend::Http($remote) => $call.await,
            Backend::Memory($remote) => $call.await,
        }
    };
}

impl Remote for Backend {
    async fn list_posts(&self) -> Result<Vec<Post>, RemoteError> {
        delegate!(self, r => r.list_posts())
    }

    async fn create_post(&self, input: &NewPost) -> Result<Post, RemoteError> {
        delegate!(self, r => r.create_post(input))
    }

    async fn delete_post(&self, id: &str) -> Result<(), RemoteError> {
        delegate!(self, r => r.delete_post(id))
    }

    async fn list_learning_progress(&self) -> Result<Vec<LearningProgress>, RemoteError> {
        delegate!(self, r => r.list_learning_progress())
    }

    async fn create_learning_progress(
        &self,
        input: &NewLearningProgress,
    ) -> Result<LearningProgress, RemoteError> {
        delegate!(self, r => r.create_learning_progress(input))
    }

    async fn update_learning_progress(
        &self,
        id: &str,
        input: &NewLearningProgress,
    ) -> Result<LearningProgress, RemoteError> {
        delegate!(self, r => r.update_learning_progress(id, input))
    }

    async fn delete_learning_progress(&self, id: &str) -> Result<(), RemoteError> {
        delegate!(self, r => r.delete_learning_progress(id))
    }

    async fn list_skill_shares(&self) -> Result<Vec<SkillShare>, RemoteError> {
        delegate!(self, r => r.list_skill_shares())
    }

    async fn create_skill_share(&self, input: &NewSkillShare) -> Result<SkillShare, RemoteError> {
        delegate!(self, r => r.create_skill_share(input))
    }

    async fn delete_skill_share(&self, id: &str) -> Result<(), RemoteError> {
        delegate!(self, r => r.delete_skill_share(id))
    }

    async fn list_stories(&self) -> Result<Vec<Story>, RemoteError> {
        delegate!(self, r => r.list_stories())
    }

    async fn create_story(&self, input: &NewStory) -> Result<Story, RemoteError> {
        delegate!(self, r => r.create_story(input))
    }

    async fn upload_file(
        &self,
        file: &MediaFile,
        category: UploadCategory,
    ) -> Result<String, RemoteError> {
        delegate!(self, r => r.upload_file(file, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::models::MediaKind;

    #[test]
    fn test_empty_base_url_selects_memory() {
        let offline = LearnLoopConfig::default().with_base_url("");
        assert!(Backend::from_config(&offline).is_offline());

        let online = LearnLoopConfig::default();
        assert!(!Backend::from_config(&online).is_offline());
    }

    #[tokio::test]
    async fn test_memory_backend_delegates() {
        let backend = Backend::from_config(&LearnLoopConfig::default().with_base_url(" "));
        let created = backend
            .create_post(&NewPost {
                user_id: "u1".to_string(),
                content_description: "offline demo".to_string(),
                media_link: "memory://posts/a.png".to_string(),
                media_type: MediaKind::Image,
            })
            .await
            .unwrap();

        let posts = backend.list_posts().await.unwrap();
        assert_eq!(posts, vec![created]);
    }
}
