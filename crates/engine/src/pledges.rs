//! The module contains the `Pledge` record.
//!
//! Pledges are append-only: once written they are never changed or removed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{MoneyCents, store::Record};

/// A committed contribution toward a project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pledge {
    pub pledge_id: String,
    pub user_id: String,
    pub project_id: String,
    pub amount: MoneyCents,
    pub created_at: NaiveDateTime,
    pub reward_tier_id: Option<String>,
}

impl Record for Pledge {
    const FILE: &'static str = "pledges.csv";
    const FIELDS: &'static [&'static str] = &[
        "pledge_id",
        "user_id",
        "project_id",
        "amount",
        "created_at",
        "reward_tier_id",
    ];
}
