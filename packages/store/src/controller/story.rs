use crate::cancel::CancelToken;
use crate::error::SubmitError;
use crate::forms::StoryForm;
use crate::remote::Remote;
use crate::state::{ModalKind, Stories, Store};

use super::{Binding, Entity};

const STORY: Entity = Entity {
    name: "story",
    title: "Story",
    plural: "stories",
};

/// Binds the story strip and the create-story modal.
#[derive(Clone, Debug)]
pub struct StoryController<R> {
    binding: Binding<R>,
}

impl<R: Remote> StoryController<R> {
    pub fn new(store: Store, remote: R) -> Self {
        Self {
            binding: Binding::new(store, remote),
        }
    }

    pub async fn load(&self, token: &CancelToken) -> Result<(), SubmitError> {
        self.binding
            .reload::<Stories>(STORY, self.binding.remote().list_stories(), token)
            .await
    }

    pub async fn submit_create(
        &self,
        form: &mut StoryForm,
        token: &CancelToken,
    ) -> Result<(), SubmitError> {
        let user = self.binding.signed_in()?;
        let payload = form.validate(&user.uid).map_err(SubmitError::Invalid)?;
        let remote = self.binding.remote();
        self.binding
            .save::<Stories, _>(
                STORY,
                "created",
                ModalKind::CreateStory,
                remote.create_story(&payload),
                remote.list_stories(),
                token,
            )
            .await?;
        form.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{signed_in, ME};
    use crate::memory::Op;
    use crate::models::{Intensity, StoryCategory, MAX_STORY_MINUTES};

    #[tokio::test]
    async fn test_create_story() {
        let (store, remote) = signed_in();
        store.open_modal(ModalKind::CreateStory);
        let controller = StoryController::new(store.clone(), remote.clone());
        let mut form = StoryForm {
            title: "First 5k".to_string(),
            timestamp: Some("2026-10-01".to_string()),
            exercise_type: "Running".to_string(),
            category: Some(StoryCategory::Beginner),
            intensity: Some(Intensity::Moderate),
            time_duration: 35,
            ..Default::default()
        };

        controller.submit_create(&mut form, &CancelToken::new()).await.unwrap();

        let stories = store.read::<Stories>();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].title, "First 5k");
        assert_eq!(stories[0].user_id, ME);
        assert_eq!(stories[0].time_duration, 35);
        assert_eq!(stories[0].intensity, Some(Intensity::Moderate));
        assert_eq!(form, StoryForm::default());
        assert_eq!(remote.calls(), vec![Op::CreateStory, Op::ListStories]);
    }

    #[tokio::test]
    async fn test_overlong_story_rejected_locally() {
        let (store, remote) = signed_in();
        let controller = StoryController::new(store, remote.clone());
        let mut form = StoryForm {
            title: "Ultra".to_string(),
            time_duration: MAX_STORY_MINUTES + 30,
            ..Default::default()
        };

        let err = controller.submit_create(&mut form, &CancelToken::new()).await.unwrap_err();
        assert!(err.field_errors().unwrap().get("time_duration").is_some());
        assert!(remote.calls().is_empty());
    }
}
