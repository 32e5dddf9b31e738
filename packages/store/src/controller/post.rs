use crate::cancel::CancelToken;
use crate::error::SubmitError;
use crate::forms::PostForm;
use crate::remote::Remote;
use crate::state::{ModalKind, Posts, Store};

use super::{ensure_owner, Binding, Entity};

const POST: Entity = Entity {
    name: "post",
    title: "Post",
    plural: "posts",
};

/// Binds the create-post modal and the post cards.
#[derive(Clone, Debug)]
pub struct PostController<R> {
    binding: Binding<R>,
}

impl<R: Remote> PostController<R> {
    pub fn new(store: Store, remote: R) -> Self {
        Self {
            binding: Binding::new(store, remote),
        }
    }

    pub async fn load(&self, token: &CancelToken) -> Result<(), SubmitError> {
        self.binding
            .reload::<Posts>(POST, self.binding.remote().list_posts(), token)
            .await
    }

    /// Validate, create, refetch. `form` is cleared on success.
    pub async fn submit_create(
        &self,
        form: &mut PostForm,
        token: &CancelToken,
    ) -> Result<(), SubmitError> {
        let user = self.binding.signed_in()?;
        let payload = form.validate(&user.uid).map_err(SubmitError::Invalid)?;
        let remote = self.binding.remote();
        self.binding
            .save::<Posts, _>(
                POST,
                "created",
                ModalKind::CreatePost,
                remote.create_post(&payload),
                remote.list_posts(),
                token,
            )
            .await?;
        form.clear();
        Ok(())
    }

    pub async fn submit_delete(&self, id: &str, token: &CancelToken) -> Result<(), SubmitError> {
        let user = self.binding.signed_in()?;
        let posts = self.binding.store().read::<Posts>();
        ensure_owner(posts.iter().find(|p| p.id == id), &user, id)?;
        let remote = self.binding.remote();
        self.binding
            .delete::<Posts>(POST, id, remote.delete_post(id), remote.list_posts(), token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{signed_in, ME};
    use crate::memory::Op;
    use crate::models::{MediaItem, MediaKind, Post};
    use crate::state::{CurrentUser, Modals, NoticeLevel, Notices};

    fn filled_form() -> PostForm {
        PostForm {
            content_description: "Finished the borrow checker chapter".to_string(),
            media: Some(MediaItem::from_url("https://cdn/notes.png", MediaKind::Image)),
        }
    }

    fn post_by(id: &str, owner: &str) -> Post {
        Post {
            id: id.to_string(),
            user_id: owner.to_string(),
            content_description: "seeded".to_string(),
            media_link: "https://cdn/x.png".to_string(),
            media_type: MediaKind::Image,
        }
    }

    #[tokio::test]
    async fn test_create_refetches_and_clears_form() {
        let (store, remote) = signed_in();
        store.open_modal(ModalKind::CreatePost);
        let controller = PostController::new(store.clone(), remote.clone());
        let mut form = filled_form();

        controller
            .submit_create(&mut form, &CancelToken::new())
            .await
            .unwrap();

        let posts = store.read::<Posts>();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].user_id, ME);
        assert_eq!(posts[0].content_description, "Finished the borrow checker chapter");
        assert_eq!(posts[0].media_link, "https://cdn/notes.png");
        assert_eq!(remote.calls(), vec![Op::CreatePost, Op::ListPosts]);

        assert!(!store.read::<Modals>().is_open(ModalKind::CreatePost));
        assert_eq!(form, PostForm::default());
        assert_eq!(store.read::<Notices>()[0].level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn test_post_without_media_never_reaches_remote() {
        let (store, remote) = signed_in();
        let controller = PostController::new(store.clone(), remote.clone());
        let mut form = PostForm {
            content_description: "no picture".to_string(),
            media: None,
        };

        let err = controller
            .submit_create(&mut form, &CancelToken::new())
            .await
            .unwrap_err();

        assert!(err.field_errors().unwrap().get("media").is_some());
        assert_eq!(remote.call_count(Op::CreatePost), 0);
        assert_eq!(form.content_description, "no picture");
    }

    #[tokio::test]
    async fn test_requires_signed_in_user() {
        let (store, remote) = signed_in();
        store.write::<CurrentUser>(None);
        let controller = PostController::new(store, remote.clone());

        let err = controller
            .submit_create(&mut filled_form(), &CancelToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, SubmitError::NotSignedIn);
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_modal_and_form() {
        let (store, remote) = signed_in();
        store.open_modal(ModalKind::CreatePost);
        remote.fail_next(Op::CreatePost);
        let controller = PostController::new(store.clone(), remote.clone());
        let mut form = filled_form();

        let err = controller
            .submit_create(&mut form, &CancelToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Remote(_)));
        assert!(store.read::<Modals>().is_open(ModalKind::CreatePost));
        assert_eq!(form, filled_form());
        assert_eq!(store.read::<Notices>()[0].level, NoticeLevel::Error);
        assert_eq!(remote.call_count(Op::ListPosts), 0);
    }

    #[tokio::test]
    async fn test_refetch_failure_after_create_closes_with_warning() {
        let (store, remote) = signed_in();
        store.open_modal(ModalKind::CreatePost);
        remote.fail_next(Op::ListPosts);
        let controller = PostController::new(store.clone(), remote.clone());
        let mut form = filled_form();

        controller
            .submit_create(&mut form, &CancelToken::new())
            .await
            .unwrap();

        assert!(store.read::<Posts>().is_empty());
        assert!(!store.read::<Modals>().is_open(ModalKind::CreatePost));
        assert_eq!(form, PostForm::default());
        assert_eq!(store.read::<Notices>()[0].level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_store_write() {
        let (store, remote) = signed_in();
        store.open_modal(ModalKind::CreatePost);
        let controller = PostController::new(store.clone(), remote.clone());
        let token = CancelToken::new();
        token.cancel();

        let err = controller
            .submit_create(&mut filled_form(), &token)
            .await
            .unwrap_err();

        assert_eq!(err, SubmitError::Cancelled);
        // The remote write completed; the store never heard about it.
        assert_eq!(remote.call_count(Op::CreatePost), 1);
        assert!(store.read::<Posts>().is_empty());
        assert!(store.read::<Modals>().is_open(ModalKind::CreatePost));
        assert!(store.read::<Notices>().is_empty());
    }

    #[tokio::test]
    async fn test_delete_only_by_owner() {
        let (store, remote) = signed_in();
        remote.seed_posts(vec![post_by("p1", ME), post_by("p2", "someone-else")]);
        let controller = PostController::new(store.clone(), remote.clone());
        let token = CancelToken::new();
        controller.load(&token).await.unwrap();

        let err = controller.submit_delete("p2", &token).await.unwrap_err();
        assert_eq!(err, SubmitError::NotOwner);
        assert_eq!(remote.call_count(Op::DeletePost), 0);

        controller.submit_delete("p1", &token).await.unwrap();
        let remaining: Vec<_> = store.read::<Posts>().into_iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec!["p2".to_string()]);
        assert!(store.snapshot().deleting.is_empty());
    }

    #[tokio::test]
    async fn test_load_replaces_list() {
        let (store, remote) = signed_in();
        store.write::<Posts>(vec![post_by("stale", ME)]);
        remote.seed_posts(vec![post_by("p1", ME), post_by("p2", ME)]);

        PostController::new(store.clone(), remote)
            .load(&CancelToken::new())
            .await
            .unwrap();

        let ids: Vec<_> = store.read::<Posts>().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p1".to_string(), "p2".to_string()]);
    }
}
