use crate::cancel::CancelToken;
use crate::config::MAX_FILES_PER_RECORD;
use crate::error::SubmitError;
use crate::forms::SkillShareForm;
use crate::remote::Remote;
use crate::state::{ModalKind, SkillShares, Store};

use super::{ensure_owner, Binding, Entity};

const SKILL_SHARE: Entity = Entity {
    name: "skill share",
    title: "Skill share",
    plural: "skill shares",
};

/// Binds the create-skill-share modal and the skill share cards.
#[derive(Clone, Debug)]
pub struct SkillShareController<R> {
    binding: Binding<R>,
    max_media: usize,
}

impl<R: Remote> SkillShareController<R> {
    /// `max_media` is capped at [`MAX_FILES_PER_RECORD`].
    pub fn new(store: Store, remote: R, max_media: usize) -> Self {
        Self {
            binding: Binding::new(store, remote),
            max_media: max_media.min(MAX_FILES_PER_RECORD),
        }
    }

    pub fn max_media(&self) -> usize {
        self.max_media
    }

    pub async fn load(&self, token: &CancelToken) -> Result<(), SubmitError> {
        self.binding
            .reload::<SkillShares>(SKILL_SHARE, self.binding.remote().list_skill_shares(), token)
            .await
    }

    pub async fn submit_create(
        &self,
        form: &mut SkillShareForm,
        token: &CancelToken,
    ) -> Result<(), SubmitError> {
        let user = self.binding.signed_in()?;
        let payload = form
            .validate(&user.uid, self.max_media)
            .map_err(SubmitError::Invalid)?;
        let remote = self.binding.remote();
        self.binding
            .save::<SkillShares, _>(
                SKILL_SHARE,
                "created",
                ModalKind::CreateSkillShare,
                remote.create_skill_share(&payload),
                remote.list_skill_shares(),
                token,
            )
            .await?;
        form.clear();
        Ok(())
    }

    pub async fn submit_delete(&self, id: &str, token: &CancelToken) -> Result<(), SubmitError> {
        let user = self.binding.signed_in()?;
        let shares = self.binding.store().read::<SkillShares>();
        ensure_owner(shares.iter().find(|s| s.id == id), &user, id)?;
        let remote = self.binding.remote();
        self.binding
            .delete::<SkillShares>(
                SKILL_SHARE,
                id,
                remote.delete_skill_share(id),
                remote.list_skill_shares(),
                token,
            )
            .await
    }
}
