//! Resource assignment commands (to projects and to tasks)

use anyhow::Result;
use clap::Subcommand;

use super::{Context, Names};
use crate::models::*;
use crate::output::print_table;

#[derive(Subcommand)]
pub enum ResourceProjectCommands {
    /// Assign a resource to a project
    Create {
        #[arg(long)]
        project_id: i64,

        #[arg(long)]
        resource_id: i64,
    },

    /// List assignments, optionally narrowed
    List {
        #[arg(long)]
        project_id: Option<i64>,

        #[arg(long)]
        resource_id: Option<i64>,
    },

    /// Move an assignment
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        project_id: Option<i64>,

        #[arg(long)]
        resource_id: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum ResourceTaskCommands {
    /// Assign a resource to a task
    Create {
        #[arg(long)]
        task_id: i64,

        #[arg(long)]
        resource_id: i64,
    },

    /// List assignments, optionally narrowed
    List {
        #[arg(long)]
        task_id: Option<i64>,

        #[arg(long)]
        resource_id: Option<i64>,
    },

    /// Move an assignment
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        task_id: Option<i64>,

        #[arg(long)]
        resource_id: Option<i64>,
    },
}

pub fn run_project(cmd: ResourceProjectCommands, ctx: &Context) -> Result<()> {
    let tracker = &ctx.tracker;
    let assignments = match cmd {
        ResourceProjectCommands::Create {
            project_id,
            resource_id,
        } => {
            let row = tracker.assign_resource_to_project(CreateResourceProjectInput {
                project_id,
                resource_id,
                assigned_at: None,
            })?;
            println!("Created assignment {}", row.id);
            vec![row]
        }
        ResourceProjectCommands::List {
            project_id,
            resource_id,
        } => tracker.list_resource_projects(project_id, resource_id)?,
        ResourceProjectCommands::Update {
            id,
            project_id,
            resource_id,
        } => {
            let row = tracker.update_resource_project(
                id,
                UpdateResourceProjectInput {
                    project_id,
                    resource_id,
                    assigned_at: None,
                },
            )?;
            println!("Updated assignment {}", row.id);
            vec![row]
        }
    };

    let projects = Names::projects(tracker)?;
    let resources = Names::resources(tracker)?;
    let rows: Vec<Vec<String>> = assignments
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                projects.get(a.project_id),
                resources.get(a.resource_id),
                a.assigned_at.clone(),
            ]
        })
        .collect();
    print_table(&["id", "project", "resource", "assigned"], &rows);
    Ok(())
}

pub fn run_task(cmd: ResourceTaskCommands, ctx: &Context) -> Result<()> {
    let tracker = &ctx.tracker;
    let assignments = match cmd {
        ResourceTaskCommands::Create {
            task_id,
            resource_id,
        } => {
            let row = tracker.assign_resource_to_task(CreateResourceTaskInput {
                task_id,
                resource_id,
                assigned_at: None,
            })?;
            println!("Created assignment {}", row.id);
            vec![row]
        }
        ResourceTaskCommands::List {
            task_id,
            resource_id,
        } => tracker.list_resource_tasks(task_id, resource_id)?,
        ResourceTaskCommands::Update {
            id,
            task_id,
            resource_id,
        } => {
            let row = tracker.update_resource_task(
                id,
                UpdateResourceTaskInput {
                    task_id,
                    resource_id,
                    assigned_at: None,
                },
            )?;
            println!("Updated assignment {}", row.id);
            vec![row]
        }
    };

    let tasks = Names::tasks(tracker)?;
    let resources = Names::resources(tracker)?;
    let rows: Vec<Vec<String>> = assignments
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                tasks.get(a.task_id),
                resources.get(a.resource_id),
                a.assigned_at.clone(),
            ]
        })
        .collect();
    print_table(&["id", "task", "resource", "assigned"], &rows);
    Ok(())
}
