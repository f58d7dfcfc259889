use std::collections::HashMap;

use crate::{
    FundingStatistics, Mode, Pledge, Project, ProjectStatistics, ResultEngine, StretchGoal,
    statistics::{progress_percent, success_rate},
};

use super::Engine;

impl Engine {
    /// Summarize projects, pledge outcomes and unlocked stretch goals.
    pub fn statistics(&self) -> ResultEngine<FundingStatistics> {
        let projects = self.store.read_all::<Project>()?;
        let pledges = self.store.read_all::<Pledge>()?;

        let mut success_by_project: HashMap<&str, usize> = HashMap::new();
        for pledge in &pledges {
            *success_by_project
                .entry(pledge.project_id.as_str())
                .or_default() += 1;
        }

        let mut unlocked_by_project: HashMap<String, Vec<String>> = HashMap::new();
        if self.mode == Mode::Stretch {
            for goal in self
                .store
                .read_all::<StretchGoal>()?
                .into_iter()
                .filter(|g| g.unlocked)
            {
                unlocked_by_project
                    .entry(goal.project_id.clone())
                    .or_default()
                    .push(goal.label().to_string());
            }
        }

        let total_rejected: u64 = projects.iter().map(|p| u64::from(p.rejected_count)).sum();
        let rows = projects
            .iter()
            .map(|project| ProjectStatistics {
                project_id: project.project_id.clone(),
                name: project.name.clone(),
                goal_amount: project.goal_amount,
                raised_amount: project.raised_amount,
                funded: project.is_funded(),
                success_count: success_by_project
                    .get(project.project_id.as_str())
                    .copied()
                    .unwrap_or_default(),
                rejected_count: project.rejected_count,
                progress_percent: progress_percent(project.raised_amount, project.goal_amount),
                unlocked_goals: unlocked_by_project
                    .remove(&project.project_id)
                    .unwrap_or_default(),
            })
            .collect();

        Ok(FundingStatistics {
            mode: self.mode,
            total_projects: projects.len(),
            total_success_pledges: pledges.len(),
            total_rejected,
            success_rate: success_rate(pledges.len(), total_rejected),
            projects: rows,
        })
    }
}
