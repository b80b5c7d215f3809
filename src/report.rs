//! Daily Markdown report.
//!
//! The generator reads through [`ReportSource`] only, so it can run against
//! the SQLite store or a test double. Output is a pure function of the source
//! snapshot and the [`ReportRequest`]; any source error aborts the whole
//! report and is returned unchanged.

use std::cmp::Ordering;
use std::collections::HashMap;

use anyhow::Result;
use chrono::{Days, NaiveDate};

use crate::config::AppConfig;
use crate::dates;
use crate::db::Database;
use crate::models::*;

/// Read-only view of the store used by [`ReportGenerator`].
///
/// Every list is expected in identity order.
pub trait ReportSource {
    fn list_projects(&self) -> Result<Vec<Project>>;
    fn tasks_by_project(&self, project_id: i64) -> Result<Vec<Task>>;
    fn resources_by_project(&self, project_id: i64) -> Result<Vec<ResourceProject>>;
    fn active_resources(&self) -> Result<Vec<Resource>>;
    fn daily_tasks_for(&self, project_id: i64, resource_id: i64) -> Result<Vec<DailyTask>>;
    fn impediments_for(&self, project_id: i64, resource_id: i64) -> Result<Vec<DailyImpediment>>;
}

impl ReportSource for Database {
    fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_all_projects()
    }

    fn tasks_by_project(&self, project_id: i64) -> Result<Vec<Task>> {
        self.get_tasks_by_project(project_id)
    }

    fn resources_by_project(&self, project_id: i64) -> Result<Vec<ResourceProject>> {
        self.get_resource_projects_by_project(project_id)
    }

    fn active_resources(&self) -> Result<Vec<Resource>> {
        self.get_active_resources()
    }

    fn daily_tasks_for(&self, project_id: i64, resource_id: i64) -> Result<Vec<DailyTask>> {
        self.get_daily_tasks_for(project_id, resource_id)
    }

    fn impediments_for(&self, project_id: i64, resource_id: i64) -> Result<Vec<DailyImpediment>> {
        self.get_impediments_for(project_id, resource_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// The completed window covers `[date - N, date - 1]`.
    pub previous_days_for_report: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            previous_days_for_report: 3,
        }
    }
}

impl From<&AppConfig> for ReportConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            previous_days_for_report: config.previous_days_for_report,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRequest {
    /// Defaults to the local date.
    pub date: Option<NaiveDate>,
    /// Takes precedence over `project_name`.
    pub project_id: Option<i64>,
    /// Case-insensitive substring of the project name.
    pub project_name: Option<String>,
}

pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn generate_daily_report<S>(&self, source: &S, request: &ReportRequest) -> Result<String>
    where
        S: ReportSource + ?Sized,
    {
        let date = request.date.unwrap_or_else(dates::today);
        let window = ReportWindow::new(date, self.config.previous_days_for_report);

        let mut doc = Document::default();
        doc.line(format!("# Diario {}", window.today));
        doc.line("---");
        doc.blank();

        let projects = select_projects(source.list_projects()?, request);
        tracing::debug!(date = %window.today, projects = projects.len(), "Generating daily report");

        for project in projects {
            doc.line(format!("## {}", project.name));
            doc.blank();

            let tasks = source.tasks_by_project(project.id)?;
            render_completed(&mut doc, &tasks, &window);
            render_due_today(&mut doc, &tasks, &window);
            render_future(&mut doc, &tasks, &window);

            if project.has_daily {
                render_daily(&mut doc, source, &project, &window)?;
            }

            doc.blank();
        }

        Ok(doc.finish())
    }
}

/// The target date and its derived boundaries, all preformatted.
struct ReportWindow {
    today: String,
    yesterday: String,
    window_start: String,
}

impl ReportWindow {
    fn new(date: NaiveDate, previous_days: u32) -> Self {
        let shift = |days: u32| {
            date.checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN)
        };
        Self {
            today: dates::format_date(date),
            yesterday: dates::format_date(shift(1)),
            window_start: dates::format_date(shift(previous_days)),
        }
    }
}

#[derive(Default)]
struct Document {
    out: String,
}

impl Document {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn detail(&mut self, task: &Task) {
        if let Some(detail) = task.detail.as_deref().filter(|d| !d.is_empty()) {
            self.line(format!("  - Detalle: {}", detail));
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Active projects in store order, narrowed by id or else by name.
fn select_projects(projects: Vec<Project>, request: &ReportRequest) -> Vec<Project> {
    let name_filter = request
        .project_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .map(str::to_lowercase);

    projects
        .into_iter()
        .filter(|p| match (request.project_id, &name_filter) {
            (Some(id), _) => p.id == id,
            (None, Some(needle)) => p.name.to_lowercase().contains(needle.as_str()),
            (None, None) => true,
        })
        .filter(|p| p.active)
        .collect()
}

fn completed_tasks<'a>(tasks: &'a [Task], window: &ReportWindow) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| match t.end_date.as_deref() {
            Some(end) if !end.is_empty() => {
                dates::is_in_range(end, &window.window_start, &window.yesterday)
            }
            _ => false,
        })
        .collect()
}

fn tasks_due_today<'a>(tasks: &'a [Task], window: &ReportWindow) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.active && t.end_date.as_deref() == Some(window.today.as_str()))
        .collect()
}

fn future_tasks<'a>(tasks: &'a [Task], window: &ReportWindow) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| {
            t.active
                && match t.end_date.as_deref() {
                    Some(end) if !end.is_empty() => {
                        dates::compare(end, &window.today) == Ordering::Greater
                    }
                    _ => true,
                }
        })
        .collect()
}

fn render_completed(doc: &mut Document, tasks: &[Task], window: &ReportWindow) {
    doc.line("### Tareas finalizadas ayer");
    let completed = completed_tasks(tasks, window);
    if completed.is_empty() {
        doc.line("- No hay tareas finalizadas en el período especificado.");
    }
    for task in completed {
        doc.line(format!(
            "- **{}** (Prioridad: {}, Finalizada: {})",
            task.title,
            task.priority,
            task.end_date.as_deref().unwrap_or_default()
        ));
        doc.detail(task);
    }
    doc.blank();
}

fn render_due_today(doc: &mut Document, tasks: &[Task], window: &ReportWindow) {
    doc.line("### Tareas para hoy");
    let due = tasks_due_today(tasks, window);
    if due.is_empty() {
        doc.line("- No hay tareas para hoy.");
    }
    for task in due {
        doc.line(format!("- **{}** (Prioridad: {})", task.title, task.priority));
        doc.detail(task);
    }
    doc.blank();
}

fn render_future(doc: &mut Document, tasks: &[Task], window: &ReportWindow) {
    doc.line("### Tareas a futuro");
    let future = future_tasks(tasks, window);
    if future.is_empty() {
        doc.line("- No hay tareas a futuro.");
    }
    for task in future {
        let end = task
            .end_date
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or("Sin fecha");
        doc.line(format!(
            "- **{}** (Prioridad: {}, Fecha fin: {})",
            task.title, task.priority, end
        ));
        doc.detail(task);
    }
    doc.blank();
}

fn render_daily<S>(
    doc: &mut Document,
    source: &S,
    project: &Project,
    window: &ReportWindow,
) -> Result<()>
where
    S: ReportSource + ?Sized,
{
    doc.line("### Daily");
    doc.blank();

    let assignments = source.resources_by_project(project.id)?;
    let active: HashMap<i64, Resource> = source
        .active_resources()?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();

    for assignment in assignments {
        // Inactive or missing resources are skipped silently
        let Some(resource) = active.get(&assignment.resource_id) else {
            continue;
        };

        doc.line(format!("#### {}", resource.name));
        doc.blank();

        doc.line("##### Qué hice ayer");
        let worked_on: Vec<DailyTask> = source
            .daily_tasks_for(project.id, resource.id)?
            .into_iter()
            .filter(|t| {
                t.active
                    && (dates::is_blank(t.end_date.as_deref())
                        || t.end_date.as_deref() == Some(window.yesterday.as_str()))
            })
            .collect();
        if worked_on.is_empty() {
            doc.line("- No hay tareas registradas.");
        }
        for task in &worked_on {
            doc.line(format!("- {}", task.title));
        }
        doc.blank();

        doc.line("##### Qué voy a hacer hoy");
        doc.line("- (Por completar)");
        doc.blank();

        doc.line("##### Impedimentos");
        let impediments: Vec<DailyImpediment> = source
            .impediments_for(project.id, resource.id)?
            .into_iter()
            .filter(|i| i.active)
            .collect();
        if impediments.is_empty() {
            doc.line("- Sin impedimentos registrados.");
        }
        for impediment in &impediments {
            doc.line(format!(
                "- **{}**: {}",
                impediment.impediment, impediment.explanation
            ));
        }
        doc.blank();

        doc.blank();
    }

    Ok(())
}
