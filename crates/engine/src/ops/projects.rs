use chrono::NaiveDate;

use crate::{
    EngineError, MoneyCents, Project, ResultEngine,
    projects::{validate_deadline, validate_goal, validate_project_id},
};

use super::{Engine, normalize_required, today};

impl Engine {
    /// Create a project with nothing raised and no rejections.
    ///
    /// Fails with `Validation` for a malformed id, an empty name, a goal
    /// `<= 0` or a deadline that is not after today, and with `Duplicate` when
    /// the id is taken (the existing project is left untouched).
    pub fn create_project(
        &self,
        project_id: &str,
        name: &str,
        goal_amount: MoneyCents,
        deadline: NaiveDate,
    ) -> ResultEngine<Project> {
        let result = self.insert_project(project_id, name, goal_amount, deadline);
        self.finish(result)
    }

    fn insert_project(
        &self,
        project_id: &str,
        name: &str,
        goal_amount: MoneyCents,
        deadline: NaiveDate,
    ) -> ResultEngine<Project> {
        validate_project_id(project_id)?;
        let name = normalize_required(name, "project name")?;
        validate_goal(goal_amount)?;
        validate_deadline(deadline, today())?;

        let mut projects = self.store.read_all::<Project>()?;
        if projects.iter().any(|p| p.project_id == project_id) {
            return Err(EngineError::Duplicate(project_id.to_string()));
        }

        let project = Project::new(project_id.to_string(), name, goal_amount, deadline);
        projects.push(project.clone());
        self.store.write_all(&projects)?;

        tracing::info!(project_id, goal = %goal_amount, %deadline, "project created");
        Ok(project)
    }

    /// Return the project with `project_id`, if any.
    pub fn project(&self, project_id: &str) -> ResultEngine<Option<Project>> {
        Ok(self
            .store
            .read_all::<Project>()?
            .into_iter()
            .find(|p| p.project_id == project_id))
    }

    /// Return every project in storage order.
    pub fn list_projects(&self) -> ResultEngine<Vec<Project>> {
        Ok(self.store.read_all()?)
    }

    /// `true` once the project reached its primary goal.
    pub fn is_funded(&self, project_id: &str) -> ResultEngine<bool> {
        Ok(self.require_project(project_id)?.is_funded())
    }

    pub(crate) fn require_project(&self, project_id: &str) -> ResultEngine<Project> {
        self.project(project_id)?
            .ok_or_else(|| EngineError::NotFound(format!("project {project_id}")))
    }

    pub(crate) fn update_raised_amount(
        &self,
        project_id: &str,
        raised_amount: MoneyCents,
    ) -> ResultEngine<bool> {
        self.update_project(project_id, |project| project.raised_amount = raised_amount)
    }

    pub(crate) fn increment_rejected(&self, project_id: &str) -> ResultEngine<bool> {
        self.update_project(project_id, |project| {
            project.rejected_count = project.rejected_count.saturating_add(1);
        })
    }

    /// Rewrite the project collection with `update` applied to one project.
    ///
    /// Returns `false` (and writes nothing) when the project does not exist.
    fn update_project(
        &self,
        project_id: &str,
        update: impl FnOnce(&mut Project),
    ) -> ResultEngine<bool> {
        let mut projects = self.store.read_all::<Project>()?;
        let Some(project) = projects.iter_mut().find(|p| p.project_id == project_id) else {
            return Ok(false);
        };
        update(project);
        self.store.write_all(&projects)?;
        Ok(true)
    }
}
