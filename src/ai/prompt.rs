use std::cmp::Ordering;

use anyhow::Result;
use chrono::NaiveDate;

use crate::dates;
use crate::db::Database;
use crate::models::*;

/// Open work of one project, as sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectWork {
    pub project: Project,
    pub tasks: Vec<Task>,
    pub daily_tasks: Vec<DailyTask>,
    pub impediments: Vec<DailyImpediment>,
}

impl ProjectWork {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.daily_tasks.is_empty() && self.impediments.is_empty()
    }
}

/// Still open on `today`: no end date, or one that is not before today.
/// Unparsable end dates compare as equal and are kept.
fn still_open(end_date: Option<&str>, today: &str) -> bool {
    match end_date {
        Some(end) if !end.is_empty() => dates::compare(end, today) != Ordering::Less,
        _ => true,
    }
}

/// Active tasks, daily tasks and impediments per project, in store order.
/// Projects with nothing open are left out.
pub fn collect_active_work(db: &Database, today: NaiveDate) -> Result<Vec<ProjectWork>> {
    let today = dates::format_date(today);
    let mut collected = Vec::new();

    for project in db.get_all_projects()? {
        let tasks = db
            .get_tasks_by_project(project.id)?
            .into_iter()
            .filter(|t| t.active && still_open(t.end_date.as_deref(), &today))
            .collect();
        let daily_tasks = db
            .get_daily_tasks_by_project(project.id)?
            .into_iter()
            .filter(|t| t.active && still_open(t.end_date.as_deref(), &today))
            .collect();
        let impediments = db
            .get_impediments_by_project(project.id)?
            .into_iter()
            .filter(|i| i.active && still_open(i.end_date.as_deref(), &today))
            .collect();

        let work = ProjectWork {
            project,
            tasks,
            daily_tasks,
            impediments,
        };

        tracing::debug!(
            project = %work.project.name,
            tasks = work.tasks.len(),
            daily_tasks = work.daily_tasks.len(),
            impediments = work.impediments.len(),
            "Collected open work"
        );

        if !work.is_empty() {
            collected.push(work);
        }
    }

    Ok(collected)
}

pub fn build_prompt(work: &[ProjectWork]) -> String {
    let mut out = String::new();
    let mut line = |text: &str| {
        out.push_str(text);
        out.push('\n');
    };

    line("Como experto project manager de un equipo de desarrollo de software, basándote en la siguiente información:");
    line("");

    for project in work {
        line(&format!("## Proyecto: {}", project.project.name));
        line("");

        if !project.tasks.is_empty() {
            line("### Tareas Generales:");
            for task in &project.tasks {
                line(&format!("- **{}** (Prioridad: {})", task.title, task.priority));
                if let Some(detail) = non_empty(task.detail.as_deref()) {
                    line(&format!("  Detalle: {}", detail));
                }
                if let Some(end) = non_empty(task.end_date.as_deref()) {
                    line(&format!("  Fecha límite: {}", end));
                }
            }
            line("");
        }

        if !project.daily_tasks.is_empty() {
            line("### Tareas Diarias del Equipo:");
            for task in &project.daily_tasks {
                line(&format!("- {}", task.title));
                if let Some(end) = non_empty(task.end_date.as_deref()) {
                    line(&format!("  Fecha límite: {}", end));
                }
            }
            line("");
        }

        if !project.impediments.is_empty() {
            line("### Impedimentos del Equipo:");
            for impediment in &project.impediments {
                line(&format!(
                    "- **{}**: {}",
                    impediment.impediment, impediment.explanation
                ));
                if let Some(end) = non_empty(impediment.end_date.as_deref()) {
                    line(&format!("  Fecha límite: {}", end));
                }
            }
            line("");
        }
    }

    line("Elabora una serie de consejos, basándote en tu experiencia de años de gestión, agrupados por proyecto, para cada tarea, tareaDaily e ImpedimentDaily.");
    line("Incluye también:");
    line("1. Recordatorios de buenas prácticas en gestión de proyectos");
    line("2. Avisos de fechas importantes:");
    line("   - Final de mes: Necesario enviar las horas imputadas al superior");
    line("   - Final de año: Completar las evaluaciones por desempeño (EVA)");
    line("");
    line("Por favor, proporciona los consejos de manera clara, estructurada y práctica.");

    out
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
