use std::collections::HashSet;

use crate::{EngineError, Mode, ResultEngine, StretchGoal};

use super::{Engine, normalize_required};

/// Smallest batch accepted by `add_stretch_goals`.
const MIN_STRETCH_GOALS: usize = 3;

impl Engine {
    /// Register the stretch goals of a project (stretch mode only).
    ///
    /// The whole batch is validated before anything is written: goals must
    /// belong to `project_id`, have a positive threshold and an id not used by
    /// the project yet, and there must be at least three of them. New goals are
    /// stored locked and then resolved against the current raised amount.
    pub fn add_stretch_goals(
        &self,
        project_id: &str,
        goals: Vec<StretchGoal>,
    ) -> ResultEngine<Vec<StretchGoal>> {
        let result = self
            .insert_stretch_goals(project_id, goals)
            .and_then(|_| {
                self.recompute(project_id)?;
                self.stretch_goals(project_id)
            });
        self.finish(result)
    }

    fn insert_stretch_goals(&self, project_id: &str, goals: Vec<StretchGoal>) -> ResultEngine<()> {
        self.require_stretch_mode()?;
        self.require_project(project_id)?;

        let mut all = self.store.read_all::<StretchGoal>()?;
        let mut taken: HashSet<String> = all
            .iter()
            .filter(|g| g.project_id == project_id)
            .map(|g| g.sg_id.clone())
            .collect();

        let mut added = Vec::with_capacity(goals.len());
        for goal in goals {
            if goal.project_id != project_id {
                return Err(EngineError::Validation(format!(
                    "stretch goal '{}' belongs to project {}, expected {project_id}",
                    goal.sg_id, goal.project_id
                )));
            }
            let sg_id = normalize_required(&goal.sg_id, "stretch goal id")?;
            if !goal.threshold_amount.is_positive() {
                return Err(EngineError::Validation(format!(
                    "threshold of stretch goal '{sg_id}' must be greater than 0"
                )));
            }
            if !taken.insert(sg_id.clone()) {
                return Err(EngineError::Duplicate(format!(
                    "stretch goal {sg_id} of project {project_id}"
                )));
            }
            added.push(StretchGoal::new(
                project_id,
                sg_id,
                goal.threshold_amount,
                goal.description.trim(),
            ));
        }
        if added.len() < MIN_STRETCH_GOALS {
            return Err(EngineError::InsufficientGoalCount(added.len()));
        }

        tracing::info!(project_id, count = added.len(), "stretch goals added");
        all.extend(added);
        self.store.write_all(&all)?;
        Ok(())
    }

    /// Bring every stretch goal of the project in line with its raised amount.
    ///
    /// The collection is only rewritten when a flag actually changes; the
    /// return value says whether that happened. An unknown project is a no-op.
    pub fn recompute(&self, project_id: &str) -> ResultEngine<bool> {
        self.require_stretch_mode()?;
        let Some(project) = self.project(project_id)? else {
            return Ok(false);
        };

        let mut goals = self.store.read_all::<StretchGoal>()?;
        let mut changed = false;
        for goal in goals.iter_mut().filter(|g| g.project_id == project_id) {
            if goal.resolve(project.raised_amount) {
                tracing::info!(
                    project_id,
                    sg_id = %goal.sg_id,
                    unlocked = goal.unlocked,
                    "stretch goal state changed"
                );
                changed = true;
            }
        }
        if changed {
            self.store.write_all(&goals)?;
        }
        Ok(changed)
    }

    /// Return the stretch goals of a project in storage order.
    pub fn stretch_goals(&self, project_id: &str) -> ResultEngine<Vec<StretchGoal>> {
        self.require_stretch_mode()?;
        Ok(self
            .store
            .read_all::<StretchGoal>()?
            .into_iter()
            .filter(|g| g.project_id == project_id)
            .collect())
    }

    pub fn unlocked_goals(&self, project_id: &str) -> ResultEngine<Vec<StretchGoal>> {
        let mut goals = self.stretch_goals(project_id)?;
        goals.retain(|g| g.unlocked);
        Ok(goals)
    }

    pub fn locked_goals(&self, project_id: &str) -> ResultEngine<Vec<StretchGoal>> {
        let mut goals = self.stretch_goals(project_id)?;
        goals.retain(|g| !g.unlocked);
        Ok(goals)
    }

    fn require_stretch_mode(&self) -> ResultEngine<()> {
        if self.mode != Mode::Stretch {
            return Err(EngineError::Validation(
                "stretch goals require stretch mode".to_string(),
            ));
        }
        Ok(())
    }
}
