//! The module contains the `RewardTier` record.

use serde::{Deserialize, Serialize};

use crate::{MoneyCents, store::Record};

/// A pledge option with a minimum amount and a finite number of slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTier {
    pub project_id: String,
    pub tier_id: String,
    pub title: String,
    pub minimum_amount: MoneyCents,
    pub quota_left: u32,
}

impl RewardTier {
    pub fn new(
        project_id: impl Into<String>,
        tier_id: impl Into<String>,
        title: impl Into<String>,
        minimum_amount: MoneyCents,
        quota_left: u32,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            tier_id: tier_id.into(),
            title: title.into(),
            minimum_amount,
            quota_left,
        }
    }

    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.quota_left == 0
    }

    pub(crate) fn is_keyed(&self, project_id: &str, tier_id: &str) -> bool {
        self.project_id == project_id && self.tier_id == tier_id
    }
}

impl Record for RewardTier {
    const FILE: &'static str = "reward_tiers.csv";
    const FIELDS: &'static [&'static str] =
        &["project_id", "tier_id", "title", "minimum_amount", "quota_left"];
}
