use super::*;
use crate::models::*;

impl Tracker {
    // ============================================================
    // Projects
    // ============================================================

    pub fn create_project(&self, input: CreateProjectInput) -> ServiceResult<Project> {
        require_text("name", &input.name)?;
        check_date("start_date", input.start_date.as_deref())?;

        let project = self.db.create_project(input)?;
        tracing::info!(id = project.id, name = %project.name, "Created project");
        Ok(project)
    }

    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.db.get_all_projects()?)
    }

    pub fn get_project(&self, id: i64) -> ServiceResult<Project> {
        self.db
            .get_project(id)?
            .ok_or_else(|| not_found("Project", id))
    }

    pub fn update_project(&self, id: i64, input: UpdateProjectInput) -> ServiceResult<Project> {
        require_text_if_set("name", input.name.as_deref())?;
        check_date("start_date", input.start_date.as_deref())?;
        if matches!(input.start_date.as_deref(), Some("")) {
            return Err(ServiceError::Validation(
                "start_date cannot be cleared".to_string(),
            ));
        }

        self.db
            .update_project(id, input)?
            .ok_or_else(|| not_found("Project", id))
    }

    pub fn delete_project(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_project(id)? {
            return Err(not_found("Project", id));
        }
        tracing::info!(id, "Deleted project");
        Ok(())
    }

    // ============================================================
    // Resource ↔ Project assignments
    // ============================================================

    pub fn assign_resource_to_project(
        &self,
        input: CreateResourceProjectInput,
    ) -> ServiceResult<ResourceProject> {
        self.require_project(input.project_id)?;
        self.require_resource(input.resource_id)?;
        check_date("assigned_at", input.assigned_at.as_deref())?;

        if self
            .db
            .find_resource_project(input.project_id, input.resource_id)?
            .is_some()
        {
            return Err(ServiceError::Validation(format!(
                "Resource {} is already assigned to project {}",
                input.resource_id, input.project_id
            )));
        }

        Ok(self.db.create_resource_project(input)?)
    }

    /// Assignments narrowed by project and/or resource; both `None` lists all.
    pub fn list_resource_projects(
        &self,
        project_id: Option<i64>,
        resource_id: Option<i64>,
    ) -> ServiceResult<Vec<ResourceProject>> {
        let rows = match (project_id, resource_id) {
            (Some(project_id), Some(resource_id)) => self
                .db
                .find_resource_project(project_id, resource_id)?
                .into_iter()
                .collect(),
            (Some(project_id), None) => self.db.get_resource_projects_by_project(project_id)?,
            (None, Some(resource_id)) => self.db.get_resource_projects_by_resource(resource_id)?,
            (None, None) => self.db.get_all_resource_projects()?,
        };
        Ok(rows)
    }

    pub fn get_resource_project(&self, id: i64) -> ServiceResult<ResourceProject> {
        self.db
            .get_resource_project(id)?
            .ok_or_else(|| not_found("ResourceProject", id))
    }

    pub fn update_resource_project(
        &self,
        id: i64,
        input: UpdateResourceProjectInput,
    ) -> ServiceResult<ResourceProject> {
        let existing = self.get_resource_project(id)?;
        if let Some(project_id) = input.project_id {
            self.require_project(project_id)?;
        }
        if let Some(resource_id) = input.resource_id {
            self.require_resource(resource_id)?;
        }
        check_date("assigned_at", input.assigned_at.as_deref())?;

        let project_id = input.project_id.unwrap_or(existing.project_id);
        let resource_id = input.resource_id.unwrap_or(existing.resource_id);
        if let Some(other) = self.db.find_resource_project(project_id, resource_id)? {
            if other.id != id {
                return Err(ServiceError::Validation(format!(
                    "Resource {} is already assigned to project {}",
                    resource_id, project_id
                )));
            }
        }

        self.db
            .update_resource_project(id, input)?
            .ok_or_else(|| not_found("ResourceProject", id))
    }

    pub fn delete_resource_project(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_resource_project(id)? {
            return Err(not_found("ResourceProject", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> Tracker {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        Tracker::new(db)
    }

    #[test]
    fn test_create_project_applies_defaults() {
        let tracker = tracker();
        let project = tracker
            .create_project(CreateProjectInput {
                name: "Alpha".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert!(project.active);
        assert!(!project.has_daily);
        assert_eq!(project.start_date, dates::today_string());
    }

    #[test]
    fn test_create_project_rejects_bad_start_date() {
        let tracker = tracker();
        let err = tracker
            .create_project(CreateProjectInput {
                name: "Alpha".to_string(),
                start_date: Some("2024-01-01".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_start_date_cannot_be_cleared() {
        let tracker = tracker();
        let project = tracker
            .create_project(CreateProjectInput {
                name: "Alpha".to_string(),
                ..Default::default()
            })
            .unwrap();

        let err = tracker
            .update_project(
                project.id,
                UpdateProjectInput {
                    start_date: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_reassigning_onto_existing_pair_is_rejected() {
        let tracker = tracker();
        let alpha = tracker
            .create_project(CreateProjectInput {
                name: "Alpha".to_string(),
                ..Default::default()
            })
            .unwrap();
        let beta = tracker
            .create_project(CreateProjectInput {
                name: "Beta".to_string(),
                ..Default::default()
            })
            .unwrap();
        let dana = tracker
            .create_resource(CreateResourceInput {
                name: "Dana".to_string(),
                ..Default::default()
            })
            .unwrap();

        tracker
            .assign_resource_to_project(CreateResourceProjectInput {
                project_id: alpha.id,
                resource_id: dana.id,
                assigned_at: None,
            })
            .unwrap();
        let second = tracker
            .assign_resource_to_project(CreateResourceProjectInput {
                project_id: beta.id,
                resource_id: dana.id,
                assigned_at: None,
            })
            .unwrap();

        let err = tracker
            .update_resource_project(
                second.id,
                UpdateResourceProjectInput {
                    project_id: Some(alpha.id),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // Rewriting a row onto its own pair is fine
        let same = tracker
            .update_resource_project(
                second.id,
                UpdateResourceProjectInput {
                    project_id: Some(beta.id),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(same.project_id, beta.id);
    }
}
