use std::collections::HashSet;

use crate::{EngineError, ResultEngine, RewardTier};

use super::{Engine, normalize_required};

impl Engine {
    /// Register the reward tiers of a project.
    ///
    /// The batch is all-or-nothing: nothing is written unless every tier is
    /// valid and no tier id clashes with an existing tier of the project.
    pub fn add_reward_tiers(
        &self,
        project_id: &str,
        tiers: Vec<RewardTier>,
    ) -> ResultEngine<Vec<RewardTier>> {
        let result = self.insert_reward_tiers(project_id, tiers);
        self.finish(result)
    }

    fn insert_reward_tiers(
        &self,
        project_id: &str,
        tiers: Vec<RewardTier>,
    ) -> ResultEngine<Vec<RewardTier>> {
        self.require_project(project_id)?;

        let mut all = self.store.read_all::<RewardTier>()?;
        let mut taken: HashSet<String> = all
            .iter()
            .filter(|t| t.project_id == project_id)
            .map(|t| t.tier_id.clone())
            .collect();

        let mut added = Vec::with_capacity(tiers.len());
        for tier in tiers {
            if tier.project_id != project_id {
                return Err(EngineError::Validation(format!(
                    "reward tier '{}' belongs to project {}, expected {project_id}",
                    tier.tier_id, tier.project_id
                )));
            }
            let tier_id = normalize_required(&tier.tier_id, "reward tier id")?;
            let title = normalize_required(&tier.title, "reward tier title")?;
            if !tier.minimum_amount.is_positive() {
                return Err(EngineError::Validation(format!(
                    "minimum amount of reward tier '{tier_id}' must be greater than 0"
                )));
            }
            if !taken.insert(tier_id.clone()) {
                return Err(EngineError::Duplicate(format!(
                    "reward tier {tier_id} of project {project_id}"
                )));
            }
            added.push(RewardTier {
                tier_id,
                title,
                ..tier
            });
        }

        all.extend(added.iter().cloned());
        self.store.write_all(&all)?;
        tracing::info!(project_id, count = added.len(), "reward tiers added");
        Ok(added)
    }

    /// Return one reward tier of a project, if any.
    pub fn reward_tier(&self, project_id: &str, tier_id: &str) -> ResultEngine<Option<RewardTier>> {
        Ok(self
            .store
            .read_all::<RewardTier>()?
            .into_iter()
            .find(|t| t.is_keyed(project_id, tier_id)))
    }

    /// Return the reward tiers of a project in storage order.
    pub fn reward_tiers(&self, project_id: &str) -> ResultEngine<Vec<RewardTier>> {
        Ok(self
            .store
            .read_all::<RewardTier>()?
            .into_iter()
            .filter(|t| t.project_id == project_id)
            .collect())
    }

    pub(crate) fn decrement_quota(
        &self,
        project_id: &str,
        tier_id: &str,
        quota_left: u32,
    ) -> ResultEngine<()> {
        let mut tiers = self.store.read_all::<RewardTier>()?;
        for tier in tiers.iter_mut().filter(|t| t.is_keyed(project_id, tier_id)) {
            tier.quota_left = quota_left;
        }
        self.store.write_all(&tiers)?;
        Ok(())
    }
}
