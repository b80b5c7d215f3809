mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::dates;
use crate::models::*;

/// SQLite-backed entity store.
///
/// Cloning is cheap; clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        tracing::debug!(path = %path.display(), "Opened database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn()?;
        schema::run_migrations(&conn)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    fn query_all<T>(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn query_one<T>(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        let conn = self.conn()?;
        Ok(conn.query_row(sql, params, map).optional()?)
    }

    fn delete_by_id(&self, table: &str, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute(&format!("DELETE FROM {} WHERE id = ?", table), [id])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Project operations
    // ============================================================

    /// All projects in identity (insertion) order.
    pub fn get_all_projects(&self) -> Result<Vec<Project>> {
        self.query_all(
            &format!("SELECT {} FROM projects ORDER BY id", PROJECT_COLUMNS),
            &[],
            project_from_row,
        )
    }

    pub fn get_project(&self, id: i64) -> Result<Option<Project>> {
        self.query_one(
            &format!("SELECT {} FROM projects WHERE id = ?", PROJECT_COLUMNS),
            &[&id],
            project_from_row,
        )
    }

    pub fn create_project(&self, input: CreateProjectInput) -> Result<Project> {
        let conn = self.conn()?;
        let start_date = input.start_date.unwrap_or_else(dates::today_string);
        let active = input.active.unwrap_or(true);
        let has_daily = input.has_daily.unwrap_or(false);

        conn.execute(
            "INSERT INTO projects (name, description, start_date, active, has_daily)
             VALUES (?, ?, ?, ?, ?)",
            (
                &input.name,
                &input.description,
                &start_date,
                flag(active),
                flag(has_daily),
            ),
        )?;

        Ok(Project {
            id: conn.last_insert_rowid(),
            name: input.name,
            description: input.description,
            start_date,
            active,
            has_daily,
        })
    }

    pub fn update_project(&self, id: i64, input: UpdateProjectInput) -> Result<Option<Project>> {
        let Some(existing) = self.get_project(id)? else {
            return Ok(None);
        };

        let project = Project {
            id,
            name: input.name.unwrap_or(existing.name),
            description: merge_optional(input.description, existing.description),
            start_date: input.start_date.unwrap_or(existing.start_date),
            active: input.active.unwrap_or(existing.active),
            has_daily: input.has_daily.unwrap_or(existing.has_daily),
        };

        let conn = self.conn()?;
        conn.execute(
            "UPDATE projects SET name = ?, description = ?, start_date = ?, active = ?, has_daily = ?
             WHERE id = ?",
            (
                &project.name,
                &project.description,
                &project.start_date,
                flag(project.active),
                flag(project.has_daily),
                id,
            ),
        )?;

        Ok(Some(project))
    }

    pub fn delete_project(&self, id: i64) -> Result<bool> {
        self.delete_by_id("projects", id)
    }

    // ============================================================
    // Resource operations
    // ============================================================

    pub fn get_all_resources(&self) -> Result<Vec<Resource>> {
        self.query_all(
            &format!("SELECT {} FROM resources ORDER BY id", RESOURCE_COLUMNS),
            &[],
            resource_from_row,
        )
    }

    pub fn get_active_resources(&self) -> Result<Vec<Resource>> {
        self.query_all(
            &format!(
                "SELECT {} FROM resources WHERE active = 1 ORDER BY id",
                RESOURCE_COLUMNS
            ),
            &[],
            resource_from_row,
        )
    }

    pub fn get_resource(&self, id: i64) -> Result<Option<Resource>> {
        self.query_one(
            &format!("SELECT {} FROM resources WHERE id = ?", RESOURCE_COLUMNS),
            &[&id],
            resource_from_row,
        )
    }

    pub fn create_resource(&self, input: CreateResourceInput) -> Result<Resource> {
        let conn = self.conn()?;
        let active = input.active.unwrap_or(true);
        let created_at = input.created_at.unwrap_or_else(dates::today_string);

        conn.execute(
            "INSERT INTO resources (name, active, created_at) VALUES (?, ?, ?)",
            (&input.name, flag(active), &created_at),
        )?;

        Ok(Resource {
            id: conn.last_insert_rowid(),
            name: input.name,
            active,
            created_at,
        })
    }

    pub fn update_resource(
        &self,
        id: i64,
        input: UpdateResourceInput,
    ) -> Result<Option<Resource>> {
        let Some(existing) = self.get_resource(id)? else {
            return Ok(None);
        };

        let resource = Resource {
            id,
            name: input.name.unwrap_or(existing.name),
            active: input.active.unwrap_or(existing.active),
            created_at: existing.created_at,
        };

        let conn = self.conn()?;
        conn.execute(
            "UPDATE resources SET name = ?, active = ? WHERE id = ?",
            (&resource.name, flag(resource.active), id),
        )?;

        Ok(Some(resource))
    }

    pub fn delete_resource(&self, id: i64) -> Result<bool> {
        self.delete_by_id("resources", id)
    }

    // ============================================================
    // Resource ↔ Project assignments
    // ============================================================

    pub fn get_all_resource_projects(&self) -> Result<Vec<ResourceProject>> {
        self.query_all(
            &format!(
                "SELECT {} FROM resource_projects ORDER BY id",
                RESOURCE_PROJECT_COLUMNS
            ),
            &[],
            resource_project_from_row,
        )
    }

    pub fn get_resource_projects_by_project(&self, project_id: i64) -> Result<Vec<ResourceProject>> {
        self.query_all(
            &format!(
                "SELECT {} FROM resource_projects WHERE project_id = ? ORDER BY id",
                RESOURCE_PROJECT_COLUMNS
            ),
            &[&project_id],
            resource_project_from_row,
        )
    }

    pub fn get_resource_projects_by_resource(
        &self,
        resource_id: i64,
    ) -> Result<Vec<ResourceProject>> {
        self.query_all(
            &format!(
                "SELECT {} FROM resource_projects WHERE resource_id = ? ORDER BY id",
                RESOURCE_PROJECT_COLUMNS
            ),
            &[&resource_id],
            resource_project_from_row,
        )
    }

    pub fn get_resource_project(&self, id: i64) -> Result<Option<ResourceProject>> {
        self.query_one(
            &format!(
                "SELECT {} FROM resource_projects WHERE id = ?",
                RESOURCE_PROJECT_COLUMNS
            ),
            &[&id],
            resource_project_from_row,
        )
    }

    pub fn find_resource_project(
        &self,
        project_id: i64,
        resource_id: i64,
    ) -> Result<Option<ResourceProject>> {
        self.query_one(
            &format!(
                "SELECT {} FROM resource_projects WHERE project_id = ? AND resource_id = ?",
                RESOURCE_PROJECT_COLUMNS
            ),
            &[&project_id, &resource_id],
            resource_project_from_row,
        )
    }

    pub fn create_resource_project(
        &self,
        input: CreateResourceProjectInput,
    ) -> Result<ResourceProject> {
        let conn = self.conn()?;
        let assigned_at = input.assigned_at.unwrap_or_else(dates::today_string);

        conn.execute(
            "INSERT INTO resource_projects (project_id, resource_id, assigned_at) VALUES (?, ?, ?)",
            (input.project_id, input.resource_id, &assigned_at),
        )?;

        Ok(ResourceProject {
            id: conn.last_insert_rowid(),
            project_id: input.project_id,
            resource_id: input.resource_id,
            assigned_at,
        })
    }

    pub fn update_resource_project(
        &self,
        id: i64,
        input: UpdateResourceProjectInput,
    ) -> Result<Option<ResourceProject>> {
        let Some(existing) = self.get_resource_project(id)? else {
            return Ok(None);
        };

        let assignment = ResourceProject {
            id,
            project_id: input.project_id.unwrap_or(existing.project_id),
            resource_id: input.resource_id.unwrap_or(existing.resource_id),
            assigned_at: input.assigned_at.unwrap_or(existing.assigned_at),
        };

        let conn = self.conn()?;
        conn.execute(
            "UPDATE resource_projects SET project_id = ?, resource_id = ?, assigned_at = ? WHERE id = ?",
            (
                assignment.project_id,
                assignment.resource_id,
                &assignment.assigned_at,
                id,
            ),
        )?;

        Ok(Some(assignment))
    }

    pub fn delete_resource_project(&self, id: i64) -> Result<bool> {
        self.delete_by_id("resource_projects", id)
    }

    // ============================================================
    // Task operations
    // ============================================================

    pub fn get_all_tasks(&self) -> Result<Vec<Task>> {
        self.filter_tasks(&TaskFilter::default())
    }

    pub fn get_tasks_by_project(&self, project_id: i64) -> Result<Vec<Task>> {
        self.filter_tasks(&TaskFilter {
            project_id: Some(project_id),
            ..Default::default()
        })
    }

    pub fn get_tasks_by_active(&self, active: bool) -> Result<Vec<Task>> {
        self.filter_tasks(&TaskFilter {
            active: Some(active),
            ..Default::default()
        })
    }

    pub fn get_tasks_by_priority(&self, priority: &str) -> Result<Vec<Task>> {
        self.filter_tasks(&TaskFilter {
            priority: Some(priority.to_string()),
            ..Default::default()
        })
    }

    pub fn search_tasks_by_title(&self, title: &str) -> Result<Vec<Task>> {
        self.filter_tasks(&TaskFilter {
            title: Some(title.to_string()),
            ..Default::default()
        })
    }

    /// Tasks matching every `Some` field of the filter, in identity order.
    pub fn filter_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut clauses: Vec<&str> = vec![];
        let mut params: Vec<Box<dyn ToSql>> = vec![];

        if let Some(id) = filter.id {
            clauses.push("id = ?");
            params.push(Box::new(id));
        }
        if let Some(project_id) = filter.project_id {
            clauses.push("project_id = ?");
            params.push(Box::new(project_id));
        }
        if let Some(active) = filter.active {
            clauses.push("active = ?");
            params.push(Box::new(flag(active)));
        }
        if let Some(priority) = filter.priority.as_deref().filter(|p| !p.trim().is_empty()) {
            clauses.push("priority = ?");
            params.push(Box::new(priority.to_string()));
        }

        let sql = format!(
            "SELECT {} FROM tasks{} ORDER BY id",
            TASK_COLUMNS,
            where_clause(&clauses)
        );
        let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut tasks = self.query_all(&sql, &params_ref, task_from_row)?;
        if let Some(title) = filter.title.as_deref().filter(|t| !t.trim().is_empty()) {
            tasks.retain(|t| contains_ignore_case(&t.title, title));
        }
        Ok(tasks)
    }

    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        self.query_one(
            &format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS),
            &[&id],
            task_from_row,
        )
    }

    pub fn create_task(&self, input: CreateTaskInput) -> Result<Task> {
        let conn = self.conn()?;
        let created_at = input.created_at.unwrap_or_else(dates::today_string);
        let end_date = input.end_date.and_then(non_empty);
        let priority = input
            .priority
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRIORITY.to_string());
        let active = input.active.unwrap_or(true);

        conn.execute(
            "INSERT INTO tasks (project_id, title, detail, created_at, end_date, priority, active)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                input.project_id,
                &input.title,
                &input.detail,
                &created_at,
                &end_date,
                &priority,
                flag(active),
            ),
        )?;

        Ok(Task {
            id: conn.last_insert_rowid(),
            project_id: input.project_id,
            title: input.title,
            detail: input.detail,
            created_at,
            end_date,
            priority,
            active,
        })
    }

    /// Apply a partial update. Returns `None` when the task does not exist.
    pub fn update_task(&self, id: i64, input: UpdateTaskInput) -> Result<Option<Task>> {
        let mut updates: Vec<&str> = vec![];
        let mut params: Vec<Box<dyn ToSql>> = vec![];

        if let Some(title) = input.title {
            updates.push("title = ?");
            params.push(Box::new(title));
        }
        if let Some(detail) = input.detail {
            updates.push("detail = ?");
            params.push(Box::new(non_empty(detail)));
        }
        if let Some(end_date) = input.end_date {
            updates.push("end_date = ?");
            params.push(Box::new(non_empty(end_date)));
        }
        if let Some(priority) = input.priority {
            updates.push("priority = ?");
            params.push(Box::new(priority));
        }
        if let Some(active) = input.active {
            updates.push("active = ?");
            params.push(Box::new(flag(active)));
        }

        if !self.apply_update("tasks", id, &updates, params)? {
            return Ok(None);
        }
        self.get_task(id)
    }

    pub fn delete_task(&self, id: i64) -> Result<bool> {
        self.delete_by_id("tasks", id)
    }

    /// Shared tail of the dynamic `UPDATE ... SET` builders.
    ///
    /// With nothing to set, reports whether the row exists.
    fn apply_update(
        &self,
        table: &str,
        id: i64,
        updates: &[&str],
        mut params: Vec<Box<dyn ToSql>>,
    ) -> Result<bool> {
        let conn = self.conn()?;

        if updates.is_empty() {
            let exists: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {} WHERE id = ?", table),
                [id],
                |row| row.get(0),
            )?;
            return Ok(exists > 0);
        }

        params.push(Box::new(id));

        let sql = format!("UPDATE {} SET {} WHERE id = ?", table, updates.join(", "));
        let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let rows = conn.execute(&sql, params_ref.as_slice())?;

        Ok(rows > 0)
    }

    // ============================================================
    // Resource ↔ Task assignments
    // ============================================================

    pub fn get_all_resource_tasks(&self) -> Result<Vec<ResourceTask>> {
        self.query_all(
            &format!(
                "SELECT {} FROM resource_tasks ORDER BY id",
                RESOURCE_TASK_COLUMNS
            ),
            &[],
            resource_task_from_row,
        )
    }

    pub fn get_resource_tasks_by_task(&self, task_id: i64) -> Result<Vec<ResourceTask>> {
        self.query_all(
            &format!(
                "SELECT {} FROM resource_tasks WHERE task_id = ? ORDER BY id",
                RESOURCE_TASK_COLUMNS
            ),
            &[&task_id],
            resource_task_from_row,
        )
    }

    pub fn get_resource_tasks_by_resource(&self, resource_id: i64) -> Result<Vec<ResourceTask>> {
        self.query_all(
            &format!(
                "SELECT {} FROM resource_tasks WHERE resource_id = ? ORDER BY id",
                RESOURCE_TASK_COLUMNS
            ),
            &[&resource_id],
            resource_task_from_row,
        )
    }

    pub fn get_resource_task(&self, id: i64) -> Result<Option<ResourceTask>> {
        self.query_one(
            &format!(
                "SELECT {} FROM resource_tasks WHERE id = ?",
                RESOURCE_TASK_COLUMNS
            ),
            &[&id],
            resource_task_from_row,
        )
    }

    pub fn find_resource_task(
        &self,
        task_id: i64,
        resource_id: i64,
    ) -> Result<Option<ResourceTask>> {
        self.query_one(
            &format!(
                "SELECT {} FROM resource_tasks WHERE task_id = ? AND resource_id = ?",
                RESOURCE_TASK_COLUMNS
            ),
            &[&task_id, &resource_id],
            resource_task_from_row,
        )
    }

    pub fn create_resource_task(&self, input: CreateResourceTaskInput) -> Result<ResourceTask> {
        let conn = self.conn()?;
        let assigned_at = input.assigned_at.unwrap_or_else(dates::today_string);

        conn.execute(
            "INSERT INTO resource_tasks (task_id, resource_id, assigned_at) VALUES (?, ?, ?)",
            (input.task_id, input.resource_id, &assigned_at),
        )?;

        Ok(ResourceTask {
            id: conn.last_insert_rowid(),
            task_id: input.task_id,
            resource_id: input.resource_id,
            assigned_at,
        })
    }

    pub fn update_resource_task(
        &self,
        id: i64,
        input: UpdateResourceTaskInput,
    ) -> Result<Option<ResourceTask>> {
        let Some(existing) = self.get_resource_task(id)? else {
            return Ok(None);
        };

        let assignment = ResourceTask {
            id,
            task_id: input.task_id.unwrap_or(existing.task_id),
            resource_id: input.resource_id.unwrap_or(existing.resource_id),
            assigned_at: input.assigned_at.unwrap_or(existing.assigned_at),
        };

        let conn = self.conn()?;
        conn.execute(
            "UPDATE resource_tasks SET task_id = ?, resource_id = ?, assigned_at = ? WHERE id = ?",
            (
                assignment.task_id,
                assignment.resource_id,
                &assignment.assigned_at,
                id,
            ),
        )?;

        Ok(Some(assignment))
    }

    pub fn delete_resource_task(&self, id: i64) -> Result<bool> {
        self.delete_by_id("resource_tasks", id)
    }

    // ============================================================
    // Daily task operations
    // ============================================================

    pub fn get_all_daily_tasks(&self) -> Result<Vec<DailyTask>> {
        self.filter_daily_tasks(&DailyTaskFilter::default())
    }

    pub fn get_daily_tasks_by_project(&self, project_id: i64) -> Result<Vec<DailyTask>> {
        self.filter_daily_tasks(&DailyTaskFilter {
            project_id: Some(project_id),
            ..Default::default()
        })
    }

    pub fn get_daily_tasks_for(&self, project_id: i64, resource_id: i64) -> Result<Vec<DailyTask>> {
        self.filter_daily_tasks(&DailyTaskFilter {
            project_id: Some(project_id),
            resource_id: Some(resource_id),
            ..Default::default()
        })
    }

    pub fn filter_daily_tasks(&self, filter: &DailyTaskFilter) -> Result<Vec<DailyTask>> {
        let mut clauses: Vec<&str> = vec![];
        let mut params: Vec<Box<dyn ToSql>> = vec![];

        if let Some(id) = filter.id {
            clauses.push("id = ?");
            params.push(Box::new(id));
        }
        if let Some(project_id) = filter.project_id {
            clauses.push("project_id = ?");
            params.push(Box::new(project_id));
        }
        if let Some(resource_id) = filter.resource_id {
            clauses.push("resource_id = ?");
            params.push(Box::new(resource_id));
        }
        if let Some(active) = filter.active {
            clauses.push("active = ?");
            params.push(Box::new(flag(active)));
        }

        let sql = format!(
            "SELECT {} FROM daily_tasks{} ORDER BY id",
            DAILY_TASK_COLUMNS,
            where_clause(&clauses)
        );
        let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut tasks = self.query_all(&sql, &params_ref, daily_task_from_row)?;
        if let Some(title) = filter.title.as_deref().filter(|t| !t.trim().is_empty()) {
            tasks.retain(|t| contains_ignore_case(&t.title, title));
        }
        Ok(tasks)
    }

    pub fn get_daily_task(&self, id: i64) -> Result<Option<DailyTask>> {
        self.query_one(
            &format!("SELECT {} FROM daily_tasks WHERE id = ?", DAILY_TASK_COLUMNS),
            &[&id],
            daily_task_from_row,
        )
    }

    pub fn create_daily_task(&self, input: CreateDailyTaskInput) -> Result<DailyTask> {
        let conn = self.conn()?;
        let created_at = input.created_at.unwrap_or_else(dates::today_string);
        let end_date = input.end_date.and_then(non_empty);
        let active = input.active.unwrap_or(true);

        conn.execute(
            "INSERT INTO daily_tasks (project_id, resource_id, title, created_at, end_date, active)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                input.project_id,
                input.resource_id,
                &input.title,
                &created_at,
                &end_date,
                flag(active),
            ),
        )?;

        Ok(DailyTask {
            id: conn.last_insert_rowid(),
            project_id: input.project_id,
            resource_id: input.resource_id,
            title: input.title,
            created_at,
            end_date,
            active,
        })
    }

    pub fn update_daily_task(
        &self,
        id: i64,
        input: UpdateDailyTaskInput,
    ) -> Result<Option<DailyTask>> {
        let mut updates: Vec<&str> = vec![];
        let mut params: Vec<Box<dyn ToSql>> = vec![];

        if let Some(title) = input.title {
            updates.push("title = ?");
            params.push(Box::new(title));
        }
        if let Some(end_date) = input.end_date {
            updates.push("end_date = ?");
            params.push(Box::new(non_empty(end_date)));
        }
        if let Some(active) = input.active {
            updates.push("active = ?");
            params.push(Box::new(flag(active)));
        }

        if !self.apply_update("daily_tasks", id, &updates, params)? {
            return Ok(None);
        }
        self.get_daily_task(id)
    }

    pub fn delete_daily_task(&self, id: i64) -> Result<bool> {
        self.delete_by_id("daily_tasks", id)
    }

    // ============================================================
    // Daily impediment operations
    // ============================================================

    pub fn get_all_impediments(&self) -> Result<Vec<DailyImpediment>> {
        self.filter_impediments(&ImpedimentFilter::default())
    }

    pub fn get_impediments_by_project(&self, project_id: i64) -> Result<Vec<DailyImpediment>> {
        self.filter_impediments(&ImpedimentFilter {
            project_id: Some(project_id),
            ..Default::default()
        })
    }

    pub fn get_impediments_for(
        &self,
        project_id: i64,
        resource_id: i64,
    ) -> Result<Vec<DailyImpediment>> {
        self.filter_impediments(&ImpedimentFilter {
            project_id: Some(project_id),
            resource_id: Some(resource_id),
            ..Default::default()
        })
    }

    pub fn get_active_impediments(&self) -> Result<Vec<DailyImpediment>> {
        self.filter_impediments(&ImpedimentFilter {
            active: Some(true),
            ..Default::default()
        })
    }

    pub fn search_impediments(&self, text: &str) -> Result<Vec<DailyImpediment>> {
        self.filter_impediments(&ImpedimentFilter {
            text: Some(text.to_string()),
            ..Default::default()
        })
    }

    pub fn filter_impediments(&self, filter: &ImpedimentFilter) -> Result<Vec<DailyImpediment>> {
        let mut clauses: Vec<&str> = vec![];
        let mut params: Vec<Box<dyn ToSql>> = vec![];

        if let Some(id) = filter.id {
            clauses.push("id = ?");
            params.push(Box::new(id));
        }
        if let Some(project_id) = filter.project_id {
            clauses.push("project_id = ?");
            params.push(Box::new(project_id));
        }
        if let Some(resource_id) = filter.resource_id {
            clauses.push("resource_id = ?");
            params.push(Box::new(resource_id));
        }
        if let Some(active) = filter.active {
            clauses.push("active = ?");
            params.push(Box::new(flag(active)));
        }

        let sql = format!(
            "SELECT {} FROM daily_impediments{} ORDER BY id",
            IMPEDIMENT_COLUMNS,
            where_clause(&clauses)
        );
        let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut rows = self.query_all(&sql, &params_ref, impediment_from_row)?;
        if let Some(text) = filter.text.as_deref().filter(|t| !t.trim().is_empty()) {
            rows.retain(|i| contains_ignore_case(&i.impediment, text));
        }
        Ok(rows)
    }

    pub fn get_impediment(&self, id: i64) -> Result<Option<DailyImpediment>> {
        self.query_one(
            &format!(
                "SELECT {} FROM daily_impediments WHERE id = ?",
                IMPEDIMENT_COLUMNS
            ),
            &[&id],
            impediment_from_row,
        )
    }

    pub fn create_impediment(&self, input: CreateImpedimentInput) -> Result<DailyImpediment> {
        let conn = self.conn()?;
        let created_at = input.created_at.unwrap_or_else(dates::today_string);
        let end_date = input.end_date.and_then(non_empty);
        let active = input.active.unwrap_or(true);

        conn.execute(
            "INSERT INTO daily_impediments (project_id, resource_id, impediment, explanation, created_at, end_date, active)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                input.project_id,
                input.resource_id,
                &input.impediment,
                &input.explanation,
                &created_at,
                &end_date,
                flag(active),
            ),
        )?;

        Ok(DailyImpediment {
            id: conn.last_insert_rowid(),
            project_id: input.project_id,
            resource_id: input.resource_id,
            impediment: input.impediment,
            explanation: input.explanation,
            created_at,
            end_date,
            active,
        })
    }

    pub fn update_impediment(
        &self,
        id: i64,
        input: UpdateImpedimentInput,
    ) -> Result<Option<DailyImpediment>> {
        let mut updates: Vec<&str> = vec![];
        let mut params: Vec<Box<dyn ToSql>> = vec![];

        if let Some(impediment) = input.impediment {
            updates.push("impediment = ?");
            params.push(Box::new(impediment));
        }
        if let Some(explanation) = input.explanation {
            updates.push("explanation = ?");
            params.push(Box::new(explanation));
        }
        if let Some(end_date) = input.end_date {
            updates.push("end_date = ?");
            params.push(Box::new(non_empty(end_date)));
        }
        if let Some(active) = input.active {
            updates.push("active = ?");
            params.push(Box::new(flag(active)));
        }

        if !self.apply_update("daily_impediments", id, &updates, params)? {
            return Ok(None);
        }
        self.get_impediment(id)
    }

    pub fn delete_impediment(&self, id: i64) -> Result<bool> {
        self.delete_by_id("daily_impediments", id)
    }
}

// ============================================================
// Row mapping
// ============================================================

const PROJECT_COLUMNS: &str = "id, name, description, start_date, active, has_daily";
const RESOURCE_COLUMNS: &str = "id, name, active, created_at";
const RESOURCE_PROJECT_COLUMNS: &str = "id, project_id, resource_id, assigned_at";
const RESOURCE_TASK_COLUMNS: &str = "id, task_id, resource_id, assigned_at";
const TASK_COLUMNS: &str = "id, project_id, title, detail, created_at, end_date, priority, active";
const DAILY_TASK_COLUMNS: &str = "id, project_id, resource_id, title, created_at, end_date, active";
const IMPEDIMENT_COLUMNS: &str =
    "id, project_id, resource_id, impediment, explanation, created_at, end_date, active";

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get(3)?,
        active: row.get::<_, i64>(4)? != 0,
        has_daily: row.get::<_, i64>(5)? != 0,
    })
}

fn resource_from_row(row: &Row<'_>) -> rusqlite::Result<Resource> {
    Ok(Resource {
        id: row.get(0)?,
        name: row.get(1)?,
        active: row.get::<_, i64>(2)? != 0,
        created_at: row.get(3)?,
    })
}

fn resource_project_from_row(row: &Row<'_>) -> rusqlite::Result<ResourceProject> {
    Ok(ResourceProject {
        id: row.get(0)?,
        project_id: row.get(1)?,
        resource_id: row.get(2)?,
        assigned_at: row.get(3)?,
    })
}

fn resource_task_from_row(row: &Row<'_>) -> rusqlite::Result<ResourceTask> {
    Ok(ResourceTask {
        id: row.get(0)?,
        task_id: row.get(1)?,
        resource_id: row.get(2)?,
        assigned_at: row.get(3)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        detail: row.get(3)?,
        created_at: row.get(4)?,
        end_date: row.get(5)?,
        priority: row.get(6)?,
        active: row.get::<_, i64>(7)? != 0,
    })
}

fn daily_task_from_row(row: &Row<'_>) -> rusqlite::Result<DailyTask> {
    Ok(DailyTask {
        id: row.get(0)?,
        project_id: row.get(1)?,
        resource_id: row.get(2)?,
        title: row.get(3)?,
        created_at: row.get(4)?,
        end_date: row.get(5)?,
        active: row.get::<_, i64>(6)? != 0,
    })
}

fn impediment_from_row(row: &Row<'_>) -> rusqlite::Result<DailyImpediment> {
    Ok(DailyImpediment {
        id: row.get(0)?,
        project_id: row.get(1)?,
        resource_id: row.get(2)?,
        impediment: row.get(3)?,
        explanation: row.get(4)?,
        created_at: row.get(5)?,
        end_date: row.get(6)?,
        active: row.get::<_, i64>(7)? != 0,
    })
}

fn flag(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

/// Empty strings are stored as NULL.
fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn merge_optional(update: Option<String>, existing: Option<String>) -> Option<String> {
    match update {
        Some(value) => non_empty(value),
        None => existing,
    }
}

/// Case-insensitive substring test. SQLite's `lower()` only folds ASCII.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn where_clause(clauses: &[&str]) -> String {
    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}
