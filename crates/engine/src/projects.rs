//! The module contains the `Project` record, the aggregate root of the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, ResultEngine, store::Record};

/// Number of digits of a project code.
pub const PROJECT_ID_LEN: usize = 8;

/// A crowdfunding campaign.
///
/// `raised_amount` and `rejected_count` are only changed by the pledge
/// processor; everything else is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub goal_amount: MoneyCents,
    pub deadline: NaiveDate,
    pub raised_amount: MoneyCents,
    #[serde(default)]
    pub rejected_count: u32,
}

impl Project {
    pub fn new(
        project_id: String,
        name: String,
        goal_amount: MoneyCents,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            project_id,
            name,
            goal_amount,
            deadline,
            raised_amount: MoneyCents::ZERO,
            rejected_count: 0,
        }
    }

    /// `true` once the raised amount reaches the primary goal.
    #[must_use]
    pub fn is_funded(&self) -> bool {
        self.raised_amount >= self.goal_amount
    }

    /// `true` when pledges dated `day` are still accepted.
    #[must_use]
    pub fn accepts_pledges_on(&self, day: NaiveDate) -> bool {
        day <= self.deadline
    }
}

impl Record for Project {
    const FILE: &'static str = "project.csv";
    const FIELDS: &'static [&'static str] = &[
        "project_id",
        "name",
        "goal_amount",
        "deadline",
        "raised_amount",
        "rejected_count",
    ];
}

/// Project codes are eight ASCII digits and never start with `0`.
pub(crate) fn validate_project_id(project_id: &str) -> ResultEngine<()> {
    let well_formed = project_id.len() == PROJECT_ID_LEN
        && project_id.bytes().all(|b| b.is_ascii_digit())
        && !project_id.starts_with('0');
    if !well_formed {
        return Err(EngineError::Validation(format!(
            "project id '{project_id}' must be {PROJECT_ID_LEN} digits not starting with 0"
        )));
    }
    Ok(())
}

pub(crate) fn validate_goal(goal_amount: MoneyCents) -> ResultEngine<()> {
    if !goal_amount.is_positive() {
        return Err(EngineError::Validation(
            "funding goal must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_deadline(deadline: NaiveDate, today: NaiveDate) -> ResultEngine<()> {
    if deadline <= today {
        return Err(EngineError::Validation(format!(
            "deadline {deadline} must be in the future"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn project_id_rules() {
        assert!(validate_project_id("12345678").is_ok());
        assert!(validate_project_id("02345678").is_err());
        assert!(validate_project_id("1234567").is_err());
        assert!(validate_project_id("123456789").is_err());
        assert!(validate_project_id("1234a678").is_err());
        assert!(validate_project_id("").is_err());
    }

    #[test]
    fn goal_must_be_positive() {
        assert!(validate_goal(MoneyCents::new(1)).is_ok());
        assert!(validate_goal(MoneyCents::ZERO).is_err());
        assert!(validate_goal(MoneyCents::new(-100)).is_err());
    }

    #[test]
    fn deadline_must_be_after_today() {
        let today = day(2026, 10, 16);
        assert!(validate_deadline(day(2026, 10, 17), today).is_ok());
        assert!(validate_deadline(today, today).is_err());
        assert!(validate_deadline(day(2026, 1, 1), today).is_err());
    }

    #[test]
    fn deadline_day_still_accepts_pledges() {
        let project = Project::new(
            "12345678".to_string(),
            "Board game".to_string(),
            MoneyCents::new(100_000),
            day(2026, 11, 15),
        );
        assert!(project.accepts_pledges_on(day(2026, 11, 15)));
        assert!(!project.accepts_pledges_on(day(2026, 11, 16)));
        assert!(!project.is_funded());
    }
}
