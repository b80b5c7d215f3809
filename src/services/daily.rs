use super::*;
use crate::models::*;

impl Tracker {
    // ============================================================
    // Daily tasks
    // ============================================================

    pub fn create_daily_task(&self, input: CreateDailyTaskInput) -> ServiceResult<DailyTask> {
        require_text("title", &input.title)?;
        self.require_project(input.project_id)?;
        self.require_resource(input.resource_id)?;
        check_date("created_at", input.created_at.as_deref())?;
        check_date("end_date", input.end_date.as_deref())?;

        Ok(self.db.create_daily_task(input)?)
    }

    pub fn list_daily_tasks(&self, filter: &DailyTaskFilter) -> ServiceResult<Vec<DailyTask>> {
        Ok(self.db.filter_daily_tasks(filter)?)
    }

    pub fn get_daily_task(&self, id: i64) -> ServiceResult<DailyTask> {
        self.db
            .get_daily_task(id)?
            .ok_or_else(|| not_found("DailyTask", id))
    }

    pub fn update_daily_task(
        &self,
        id: i64,
        input: UpdateDailyTaskInput,
    ) -> ServiceResult<DailyTask> {
        require_text_if_set("title", input.title.as_deref())?;
        check_date("end_date", input.end_date.as_deref())?;

        self.db
            .update_daily_task(id, input)?
            .ok_or_else(|| not_found("DailyTask", id))
    }

    pub fn delete_daily_task(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_daily_task(id)? {
            return Err(not_found("DailyTask", id));
        }
        Ok(())
    }

    // ============================================================
    // Impediments
    // ============================================================

    pub fn create_impediment(
        &self,
        input: CreateImpedimentInput,
    ) -> ServiceResult<DailyImpediment> {
        require_text("impediment", &input.impediment)?;
        require_text("explanation", &input.explanation)?;
        self.require_project(input.project_id)?;
        self.require_resource(input.resource_id)?;
        check_date("created_at", input.created_at.as_deref())?;
        check_date("end_date", input.end_date.as_deref())?;

        let impediment = self.db.create_impediment(input)?;
        tracing::info!(
            id = impediment.id,
            project_id = impediment.project_id,
            resource_id = impediment.resource_id,
            "Recorded impediment"
        );
        Ok(impediment)
    }

    pub fn list_impediments(&self, filter: &ImpedimentFilter) -> ServiceResult<Vec<DailyImpediment>> {
        Ok(self.db.filter_impediments(filter)?)
    }

    pub fn get_impediment(&self, id: i64) -> ServiceResult<DailyImpediment> {
        self.db
            .get_impediment(id)?
            .ok_or_else(|| not_found("DailyImpediment", id))
    }

    pub fn update_impediment(
        &self,
        id: i64,
        input: UpdateImpedimentInput,
    ) -> ServiceResult<DailyImpediment> {
        require_text_if_set("impediment", input.impediment.as_deref())?;
        require_text_if_set("explanation", input.explanation.as_deref())?;
        check_date("end_date", input.end_date.as_deref())?;

        self.db
            .update_impediment(id, input)?
            .ok_or_else(|| not_found("DailyImpediment", id))
    }

    pub fn delete_impediment(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_impediment(id)? {
            return Err(not_found("DailyImpediment", id));
        }
        Ok(())
    }
}
