use super::*;
use crate::models::*;

impl Tracker {
    pub fn create_resource(&self, input: CreateResourceInput) -> ServiceResult<Resource> {
        require_text("name", &input.name)?;
        check_date("created_at", input.created_at.as_deref())?;

        let resource = self.db.create_resource(input)?;
        tracing::info!(id = resource.id, name = %resource.name, "Created resource");
        Ok(resource)
    }

    pub fn list_resources(&self) -> ServiceResult<Vec<Resource>> {
        Ok(self.db.get_all_resources()?)
    }

    pub fn list_active_resources(&self) -> ServiceResult<Vec<Resource>> {
        Ok(self.db.get_active_resources()?)
    }

    pub fn get_resource(&self, id: i64) -> ServiceResult<Resource> {
        self.db
            .get_resource(id)?
            .ok_or_else(|| not_found("Resource", id))
    }

    pub fn update_resource(&self, id: i64, input: UpdateResourceInput) -> ServiceResult<Resource> {
        require_text_if_set("name", input.name.as_deref())?;

        self.db
            .update_resource(id, input)?
            .ok_or_else(|| not_found("Resource", id))
    }

    pub fn delete_resource(&self, id: i64) -> ServiceResult<()> {
        if !self.db.delete_resource(id)? {
            return Err(not_found("Resource", id));
        }
        tracing::info!(id, "Deleted resource");
        Ok(())
    }
}
