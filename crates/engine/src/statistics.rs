//! Read model summarizing every project of a data directory.

use serde::Serialize;

use crate::{Mode, MoneyCents};

/// Overall figures plus one row per project.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FundingStatistics {
    pub mode: Mode,
    pub total_projects: usize,
    pub total_success_pledges: usize,
    pub total_rejected: u64,
    /// Share of successful attempts, in percent.
    pub success_rate: f64,
    pub projects: Vec<ProjectStatistics>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectStatistics {
    pub project_id: String,
    pub name: String,
    pub goal_amount: MoneyCents,
    pub raised_amount: MoneyCents,
    pub funded: bool,
    pub success_count: usize,
    pub rejected_count: u32,
    /// `raised * 100 / goal`, capped at 100.
    pub progress_percent: u8,
    /// Labels of unlocked stretch goals; always empty in basic mode.
    pub unlocked_goals: Vec<String>,
}

pub(crate) fn success_rate(success: usize, rejected: u64) -> f64 {
    let attempts = (success as u64 + rejected).max(1);
    success as f64 / attempts as f64 * 100.0
}

pub(crate) fn progress_percent(raised: MoneyCents, goal: MoneyCents) -> u8 {
    if !goal.is_positive() || raised.cents() <= 0 {
        return 0;
    }
    let percent = i128::from(raised.cents()) * 100 / i128::from(goal.cents());
    percent.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_handles_no_attempts() {
        assert_eq!(success_rate(0, 0), 0.0);
        assert_eq!(success_rate(3, 1), 75.0);
    }

    #[test]
    fn progress_is_truncated_and_capped() {
        assert_eq!(progress_percent(MoneyCents::new(40_000), MoneyCents::new(100_000)), 40);
        assert_eq!(progress_percent(MoneyCents::new(33_333), MoneyCents::new(100_000)), 33);
        assert_eq!(progress_percent(MoneyCents::new(110_000), MoneyCents::new(100_000)), 100);
        assert_eq!(progress_percent(MoneyCents::ZERO, MoneyCents::new(100_000)), 0);
    }
}
