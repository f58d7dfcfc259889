use crate::{
    EngineError, Mode, MoneyCents, Pledge, PledgeCmd, ResultEngine, RewardTier,
};

use super::{Engine, now, truncate_to_seconds};

/// A pledge that passed validation, with everything needed to commit it.
#[derive(Debug)]
struct PledgePlan {
    pledge: Pledge,
    raised_amount: MoneyCents,
    tier: Option<RewardTier>,
}

impl Engine {
    /// Validate and commit a pledge.
    ///
    /// On success the pledge is appended, the project's raised amount grows by
    /// `amount`, the claimed tier loses one slot and, in stretch mode, the
    /// project's stretch goals are recomputed.
    ///
    /// A rejected pledge writes no pledge and changes no amount or quota, but
    /// the project's rejection count goes up by one before the error is
    /// returned. Pledge ids are not deduplicated: submitting the same command
    /// twice counts twice.
    pub fn add_pledge(&self, cmd: PledgeCmd) -> ResultEngine<Pledge> {
        let project_id = cmd.project_id.clone();
        let result = match self.plan_pledge(cmd) {
            Ok(plan) => self.commit_pledge(plan),
            Err(err) if err.is_rejection() => Err(self.reject_pledge(&project_id, err)),
            Err(err) => Err(err),
        };
        self.finish(result)
    }

    /// Return the pledges of a project in the order they were committed.
    pub fn pledges(&self, project_id: &str) -> ResultEngine<Vec<Pledge>> {
        Ok(self
            .store
            .read_all::<Pledge>()?
            .into_iter()
            .filter(|p| p.project_id == project_id)
            .collect())
    }

    fn plan_pledge(&self, cmd: PledgeCmd) -> ResultEngine<PledgePlan> {
        let project = self.require_project(&cmd.project_id)?;
        let reward_tier_id = cmd.reward_tier_id.filter(|id| !id.trim().is_empty());
        let created_at = cmd.created_at.map_or_else(now, truncate_to_seconds);

        if !project.accepts_pledges_on(created_at.date()) {
            return Err(EngineError::DeadlineExpired(project.project_id));
        }
        if !cmd.amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "pledge amount must be greater than 0, got {}",
                cmd.amount
            )));
        }

        let tier = match reward_tier_id.as_deref() {
            None => None,
            Some(tier_id) => {
                let tier = self
                    .reward_tier(&project.project_id, tier_id)?
                    .ok_or_else(|| EngineError::NotFound(format!("reward tier {tier_id}")))?;
                if cmd.amount < tier.minimum_amount {
                    return Err(EngineError::BelowMinimum(format!(
                        "{} requires {}, got {}",
                        tier.tier_id, tier.minimum_amount, cmd.amount
                    )));
                }
                if tier.is_sold_out() {
                    return Err(EngineError::QuotaExhausted(tier.tier_id));
                }
                Some(tier)
            }
        };

        let raised_amount = project
            .raised_amount
            .checked_add(cmd.amount)
            .ok_or_else(|| EngineError::InvalidAmount("raised amount too large".to_string()))?;

        Ok(PledgePlan {
            pledge: Pledge {
                pledge_id: cmd.pledge_id,
                user_id: cmd.user_id,
                project_id: project.project_id,
                amount: cmd.amount,
                created_at,
                reward_tier_id,
            },
            raised_amount,
            tier,
        })
    }

    /// Steps after validation; a storage failure in between is not rolled back.
    fn commit_pledge(&self, plan: PledgePlan) -> ResultEngine<Pledge> {
        let PledgePlan {
            pledge,
            raised_amount,
            tier,
        } = plan;

        self.store.append(pledge.clone())?;
        self.update_raised_amount(&pledge.project_id, raised_amount)?;
        if let Some(tier) = &tier {
            self.decrement_quota(&tier.project_id, &tier.tier_id, tier.quota_left - 1)?;
        }
        if self.mode == Mode::Stretch {
            self.recompute(&pledge.project_id)?;
        }

        tracing::info!(
            pledge_id = %pledge.pledge_id,
            project_id = %pledge.project_id,
            amount = %pledge.amount,
            raised = %raised_amount,
            "pledge committed"
        );
        Ok(pledge)
    }

    /// Count a failed attempt against the project and return the error to report.
    fn reject_pledge(&self, project_id: &str, err: EngineError) -> EngineError {
        tracing::debug!(project_id, "pledge rejected: {err}");
        match self.increment_rejected(project_id) {
            Ok(_) => err,
            Err(store_err) => {
                tracing::error!(project_id, "failed to record rejection ({err}): {store_err}");
                store_err
            }
        }
    }
}
