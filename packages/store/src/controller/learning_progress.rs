use crate::cancel::CancelToken;
use crate::error::SubmitError;
use crate::forms::LearningProgressForm;
use crate::models::LearningProgress;
use crate::remote::Remote;
use crate::state::{LearningProgressList, ModalKind, SelectedLearningProgress, Store};

use super::{ensure_owner, Binding, Entity};

const LEARNING_PROGRESS: Entity = Entity {
    name: "learning progress update",
    title: "Learning progress update",
    plural: "learning progress updates",
};

/// Binds the learning progress modal (create and edit) and its cards.
#[derive(Clone, Debug)]
pub struct LearningProgressController<R> {
    binding: Binding<R>,
}

impl<R: Remote> LearningProgressController<R> {
    pub fn new(store: Store, remote: R) -> Self {
        Self {
            binding: Binding::new(store, remote),
        }
    }

    pub async fn load(&self, token: &CancelToken) -> Result<(), SubmitError> {
        self.binding
            .reload::<LearningProgressList>(
                LEARNING_PROGRESS,
                self.binding.remote().list_learning_progress(),
                token,
            )
            .await
    }

    pub async fn submit_create(
        &self,
        form: &mut LearningProgressForm,
        token: &CancelToken,
    ) -> Result<(), SubmitError> {
        let user = self.binding.signed_in()?;
        let payload = form.validate(&user.uid).map_err(SubmitError::Invalid)?;
        let remote = self.binding.remote();
        self.binding
            .save::<LearningProgressList, _>(
                LEARNING_PROGRESS,
                "created",
                ModalKind::CreateLearningProgress,
                remote.create_learning_progress(&payload),
                remote.list_learning_progress(),
                token,
            )
            .await?;
        form.clear();
        Ok(())
    }

    /// Point the edit modal at `record` and open it.
    pub fn open_edit(&self, record: &LearningProgress) -> Result<(), SubmitError> {
        let user = self.binding.signed_in()?;
        ensure_owner(Some(record), &user, &record.id)?;
        let store = self.binding.store();
        store.write::<SelectedLearningProgress>(Some(record.clone()));
        store.open_modal(ModalKind::EditLearningProgress);
        Ok(())
    }

    /// Drop the selection and close the edit modal without saving.
    pub fn close_edit(&self) {
        let store = self.binding.store();
        store.write::<SelectedLearningProgress>(None);
        store.close_modal(ModalKind::EditLearningProgress);
    }

    /// Update `id` with the form. Only the record's owner may do this.
    pub async fn submit_edit(
        &self,
        id: &str,
        form: &mut LearningProgressForm,
        token: &CancelToken,
    ) -> Result<(), SubmitError> {
        let user = self.binding.signed_in()?;
        let snapshot = self.binding.store().snapshot();
        let record = snapshot
            .learning_progress
            .iter()
            .chain(snapshot.selected_learning_progress.as_ref())
            .find(|r| r.id == id);
        ensure_owner(record, &user, id)?;
        let payload = form.validate(&user.uid).map_err(SubmitError::Invalid)?;

        let remote = self.binding.remote();
        self.binding
            .save::<LearningProgressList, _>(
                LEARNING_PROGRESS,
                "updated",
                ModalKind::EditLearningProgress,
                remote.update_learning_progress(id, &payload),
                remote.list_learning_progress(),
                token,
            )
            .await?;
        self.binding.store().write::<SelectedLearningProgress>(None);
        form.clear();
        Ok(())
    }

    pub async fn submit_delete(&self, id: &str, token: &CancelToken) -> Result<(), SubmitError> {
        let user = self.binding.signed_in()?;
        let items = self.binding.store().read::<LearningProgressList>();
        ensure_owner(items.iter().find(|r| r.id == id), &user, id)?;

        let remote = self.binding.remote();
        self.binding
            .delete::<LearningProgressList>(
                LEARNING_PROGRESS,
                id,
                remote.delete_learning_progress(id),
                remote.list_learning_progress(),
                token,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{signed_in, ME};
    use crate::memory::{MemoryRemote, Op};
    use crate::state::{Deleting, Modals, NoticeLevel, Notices, StorePath};

    fn record(id: &str, owner: &str) -> LearningProgress {
        LearningProgress {
            id: id.to_string(),
            user_id: owner.to_string(),
            plan_name: format!("Plan {id}"),
            description: "Async Rust".to_string(),
            goal: "The async book".to_string(),
            routines: "futures, pinning".to_string(),
            category: None,
            last_updated: None,
            completed_items: None,
            total_items: None,
        }
    }

    fn form() -> LearningProgressForm {
        LearningProgressForm {
            plan_name: "Tokio deep dive".to_string(),
            description: "Runtime internals".to_string(),
            goal: "tokio.rs tutorial".to_string(),
            routines: "tasks, channels".to_string(),
        }
    }

    async fn loaded(items: Vec<LearningProgress>) -> (Store, MemoryRemote, LearningProgressController<MemoryRemote>) {
        let (store, remote) = signed_in();
        remote.seed_learning_progress(items);
        let controller = LearningProgressController::new(store.clone(), remote.clone());
        controller.load(&CancelToken::new()).await.unwrap();
        (store, remote, controller)
    }

    #[tokio::test]
    async fn test_create_adds_matching_record() {
        let (store, remote, controller) = loaded(Vec::new()).await;
        store.open_modal(ModalKind::CreateLearningProgress);
        let mut f = form();

        controller.submit_create(&mut f, &CancelToken::new()).await.unwrap();

        let items = store.read::<LearningProgressList>();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].plan_name, "Tokio deep dive");
        assert_eq!(items[0].skills(), vec!["tasks", "channels"]);
        assert_eq!(items[0].user_id, ME);
        assert!(!store.read::<Modals>().is_open(ModalKind::CreateLearningProgress));
        assert_eq!(f, LearningProgressForm::default());
        assert_eq!(remote.call_count(Op::CreateLearningProgress), 1);
    }

    #[tokio::test]
    async fn test_blank_fields_block_create() {
        let (_, remote, controller) = loaded(Vec::new()).await;
        let mut f = LearningProgressForm::default();

        let err = controller.submit_create(&mut f, &CancelToken::new()).await.unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("plan_name"), Some("Please add a title"));
        assert_eq!(remote.call_count(Op::CreateLearningProgress), 0);
    }

    #[tokio::test]
    async fn test_open_edit_then_submit() {
        let (store, remote, controller) = loaded(vec![record("lp-a", ME)]).await;
        let target = store.read::<LearningProgressList>()[0].clone();

        controller.open_edit(&target).unwrap();
        assert_eq!(store.read::<SelectedLearningProgress>(), Some(target.clone()));
        assert!(store.read::<Modals>().is_open(ModalKind::EditLearningProgress));

        let mut f = LearningProgressForm::from_record(&target);
        f.plan_name = "Renamed".to_string();
        controller.submit_edit("lp-a", &mut f, &CancelToken::new()).await.unwrap();

        assert_eq!(store.read::<LearningProgressList>()[0].plan_name, "Renamed");
        assert_eq!(store.read::<SelectedLearningProgress>(), None);
        assert!(!store.read::<Modals>().is_open(ModalKind::EditLearningProgress));
        assert_eq!(remote.call_count(Op::UpdateLearningProgress), 1);
    }

    #[tokio::test]
    async fn test_edit_and_delete_refused_for_non_owner() {
        let (store, remote, controller) = loaded(vec![record("lp-b", "someone-else")]).await;
        let theirs = store.read::<LearningProgressList>()[0].clone();

        assert_eq!(controller.open_edit(&theirs), Err(SubmitError::NotOwner));
        assert!(!store.read::<Modals>().is_open(ModalKind::EditLearningProgress));

        let err = controller
            .submit_edit("lp-b", &mut form(), &CancelToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, SubmitError::NotOwner);

        let err = controller.submit_delete("lp-b", &CancelToken::new()).await.unwrap_err();
        assert_eq!(err, SubmitError::NotOwner);

        assert_eq!(remote.call_count(Op::UpdateLearningProgress), 0);
        assert_eq!(remote.call_count(Op::DeleteLearningProgress), 0);
    }

    #[tokio::test]
    async fn test_failed_delete_clears_flag_and_keeps_item() {
        let (store, remote, controller) = loaded(vec![record("lp-a", ME), record("lp-c", ME)]).await;
        let before = store.read::<LearningProgressList>();
        let mut flags = store.subscribe([StorePath::Deleting]);
        remote.fail_next(Op::DeleteLearningProgress);

        let err = controller.submit_delete("lp-a", &CancelToken::new()).await.unwrap_err();

        assert!(matches!(err, SubmitError::Remote(_)));
        // The flag was raised for the call and lowered afterwards.
        let mut raised = 0;
        while flags.try_drain().is_some() {
            raised += 1;
        }
        assert!(raised > 0);
        assert!(store.read::<Deleting>().is_empty());
        assert_eq!(store.read::<LearningProgressList>(), before);
        assert_eq!(remote.call_count(Op::ListLearningProgress), 1);

        let notices = store.read::<Notices>();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_delete_refetches() {
        let (store, _, controller) = loaded(vec![record("lp-a", ME), record("lp-c", ME)]).await;
        controller.submit_delete("lp-c", &CancelToken::new()).await.unwrap();

        let ids: Vec<_> = store
            .read::<LearningProgressList>()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["lp-a".to_string()]);
        assert!(store.read::<Deleting>().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_delete_still_lowers_flag() {
        let (store, remote, controller) = loaded(vec![record("lp-a", ME)]).await;
        let before = store.read::<LearningProgressList>();
        let token = CancelToken::new();
        token.cancel();

        let err = controller.submit_delete("lp-a", &token).await.unwrap_err();
        assert_eq!(err, SubmitError::Cancelled);
        assert_eq!(remote.call_count(Op::DeleteLearningProgress), 1);
        assert!(store.read::<Deleting>().is_empty());
        assert_eq!(store.read::<LearningProgressList>(), before);
    }
}
