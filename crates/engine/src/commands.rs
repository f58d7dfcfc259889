//! Command structs for engine operations.
//!
//! These types group parameters for the pledge entry point, keeping call sites
//! readable and avoiding long argument lists.

use chrono::NaiveDateTime;

use crate::{MoneyCents, Session};

/// Pledge `amount` toward a project, optionally claiming a reward tier.
#[derive(Clone, Debug)]
pub struct PledgeCmd {
    pub pledge_id: String,
    pub user_id: String,
    pub project_id: String,
    pub amount: MoneyCents,
    /// Defaults to the local time when the pledge is processed.
    pub created_at: Option<NaiveDateTime>,
    pub reward_tier_id: Option<String>,
}

impl PledgeCmd {
    #[must_use]
    pub fn new(
        pledge_id: impl Into<String>,
        user_id: impl Into<String>,
        project_id: impl Into<String>,
        amount: MoneyCents,
    ) -> Self {
        Self {
            pledge_id: pledge_id.into(),
            user_id: user_id.into(),
            project_id: project_id.into(),
            amount,
            created_at: None,
            reward_tier_id: None,
        }
    }

    /// Pledge on behalf of the logged-in user.
    #[must_use]
    pub fn for_session(
        pledge_id: impl Into<String>,
        session: &Session,
        project_id: impl Into<String>,
        amount: MoneyCents,
    ) -> Self {
        Self::new(pledge_id, session.user_id.clone(), project_id, amount)
    }

    #[must_use]
    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Claims a reward tier. An empty id means no tier.
    #[must_use]
    pub fn reward_tier(mut self, tier_id: impl Into<String>) -> Self {
        let tier_id = tier_id.into();
        self.reward_tier_id = (!tier_id.trim().is_empty()).then_some(tier_id);
        self
    }
}
