//! Task commands

use anyhow::Result;
use clap::Subcommand;

use super::{parse_flag, Context, Names};
use crate::models::{CreateTaskInput, Task, TaskFilter, UpdateTaskInput};
use crate::output::{or_dash, print_table, yes_no};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task under a project
    ///
    /// Examples:
    ///   dtrack task create --project-id 1 --title "Fix bug" --priority Alta
    ///   dtrack task create --project-id 1 --title "Release" --end-date 31/03/2025
    Create {
        #[arg(long)]
        project_id: i64,

        #[arg(long)]
        title: String,

        #[arg(long)]
        detail: Option<String>,

        /// Alta, Media or Baja (default Media)
        #[arg(long)]
        priority: Option<String>,

        /// dd/MM/yyyy
        #[arg(long)]
        end_date: Option<String>,
    },

    /// List tasks; filters combine
    List {
        #[arg(long)]
        id: Option<i64>,

        #[arg(long)]
        project_id: Option<i64>,

        /// Case-insensitive substring of the title
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,
    },

    /// Update a task; only the given fields change
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        title: Option<String>,

        /// An empty value clears the detail
        #[arg(long)]
        detail: Option<String>,

        /// dd/MM/yyyy; an empty value reopens the task
        #[arg(long)]
        end_date: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,
    },
}

pub fn run(cmd: TaskCommands, ctx: &Context) -> Result<()> {
    let tasks = match cmd {
        TaskCommands::Create {
            project_id,
            title,
            detail,
            priority,
            end_date,
        } => {
            let task = ctx.tracker.create_task(CreateTaskInput {
                project_id,
                title,
                detail,
                created_at: None,
                end_date,
                priority,
                active: None,
            })?;
            println!("Created task {}", task.id);
            vec![task]
        }
        TaskCommands::List {
            id,
            project_id,
            title,
            priority,
            active,
        } => ctx.tracker.list_tasks(&TaskFilter {
            id,
            project_id,
            active,
            title,
            priority,
        })?,
        TaskCommands::Update {
            id,
            title,
            detail,
            end_date,
            priority,
            active,
        } => {
            let task = ctx.tracker.update_task(
                id,
                UpdateTaskInput {
                    title,
                    detail,
                    end_date,
                    priority,
                    active,
                },
            )?;
            println!("Updated task {}", task.id);
            vec![task]
        }
    };

    show(ctx, &tasks)
}

fn show(ctx: &Context, tasks: &[Task]) -> Result<()> {
    let projects = Names::projects(&ctx.tracker)?;
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                projects.get(t.project_id),
                t.title.clone(),
                t.priority.clone(),
                t.created_at.clone(),
                or_dash(t.end_date.as_deref()),
                yes_no(t.active),
            ]
        })
        .collect();

    print_table(
        &["id", "project", "title", "priority", "created", "end", "active"],
        &rows,
    );
    Ok(())
}
