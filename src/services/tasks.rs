use super::*;
use crate::models::*;

impl Tracker {
    // ============================================================
    // Tasks
    // ============================================================

    pub fn create_task(&self, input: CreateTaskInput) -> ServiceResult<Task> {
        require_text("title", &input.title)?;
        self.require_project(input.project_id)?;
        check_date("created_at", input.created_at.as_deref())?;
        check_date("end_date", input.end_date.as_deref())?;

        let task = self.db.create_task(input)?;
        tracing::info!(id = task.id, project_id = task.project_id, "Created task");
        Ok(task)
    }

    pub fn list_tasks(&self, filter: &TaskFilter) -> ServiceResult<Vec<Task>> {
        Ok(self.db.filter_tasks(filter)?)
    }

    pub fn get_task(&self, id: i64) -> ServiceResult<Task> {
        self.db.get_task(id)?.ok_or_else(|| not_found("Task", id))
    }

    /// `end_date: Some("")` reopens the task.
    pub fn update_task(&self, id: i64, input: UpdateTaskInput) -> ServiceResult<Task> {
        require_text_if_set("title", input.title.as_deref())?;
        require_text_if_set("priority", input.priority.as_deref())?;
        check_date("end_date", input.end_date.as_deref())?;

        self.db
            .update_task(id, input)?
            .ok_or_else(|| not_found("Task", id))
    }

    pub fn delete_task(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_task(id)? {
            return Err(not_found("Task", id));
        }
        Ok(())
    }

    // ============================================================
    // Resource ↔ Task assignments
    // ============================================================

    pub fn assign_resource_to_task(
        &self,
        input: CreateResourceTaskInput,
    ) -> ServiceResult<ResourceTask> {
        self.require_task(input.task_id)?;
        self.require_resource(input.resource_id)?;
        check_date("assigned_at", input.assigned_at.as_deref())?;

        if self
            .db
            .find_resource_task(input.task_id, input.resource_id)?
            .is_some()
        {
            return Err(ServiceError::Validation(format!(
                "Resource {} is already assigned to task {}",
                input.resource_id, input.task_id
            )));
        }

        Ok(self.db.create_resource_task(input)?)
    }

    pub fn list_resource_tasks(
        &self,
        task_id: Option<i64>,
        resource_id: Option<i64>,
    ) -> ServiceResult<Vec<ResourceTask>> {
        let rows = match (task_id, resource_id) {
            (Some(task_id), Some(resource_id)) => self
                .db
                .find_resource_task(task_id, resource_id)?
                .into_iter()
                .collect(),
            (Some(task_id), None) => self.db.get_resource_tasks_by_task(task_id)?,
            (None, Some(resource_id)) => self.db.get_resource_tasks_by_resource(resource_id)?,
            (None, None) => self.db.get_all_resource_tasks()?,
        };
        Ok(rows)
    }

    pub fn get_resource_task(&self, id: i64) -> ServiceResult<ResourceTask> {
        self.db
            .get_resource_task(id)?
            .ok_or_else(|| not_found("ResourceTask", id))
    }

    pub fn update_resource_task(
        &self,
        id: i64,
        input: UpdateResourceTaskInput,
    ) -> ServiceResult<ResourceTask> {
        let existing = self.get_resource_task(id)?;
        if let Some(task_id) = input.task_id {
            self.require_task(task_id)?;
        }
        if let Some(resource_id) = input.resource_id {
            self.require_resource(resource_id)?;
        }
        check_date("assigned_at", input.assigned_at.as_deref())?;

        let task_id = input.task_id.unwrap_or(existing.task_id);
        let resource_id = input.resource_id.unwrap_or(existing.resource_id);
        if let Some(other) = self.db.find_resource_task(task_id, resource_id)? {
            if other.id != id {
                return Err(ServiceError::Validation(format!(
                    "Resource {} is already assigned to task {}",
                    resource_id, task_id
                )));
            }
        }

        self.db
            .update_resource_task(id, input)?
            .ok_or_else(|| not_found("ResourceTask", id))
    }

    pub fn delete_resource_task(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_resource_task(id)? {
            return Err(not_found("ResourceTask", id));
        }
        Ok(())
    }
}
