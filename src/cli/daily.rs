//! Stand-up commands: daily tasks and impediments

use anyhow::Result;
use clap::Subcommand;

use super::{parse_flag, Context, Names};
use crate::models::*;
use crate::output::{or_dash, print_table, yes_no};

#[derive(Subcommand)]
pub enum DailyTaskCommands {
    /// Record what a resource is working on
    Create {
        #[arg(long)]
        project_id: i64,

        #[arg(long)]
        resource_id: i64,

        #[arg(long)]
        title: String,

        /// dd/MM/yyyy
        #[arg(long)]
        end_date: Option<String>,
    },

    /// List daily tasks; filters combine
    List {
        #[arg(long)]
        id: Option<i64>,

        #[arg(long)]
        project_id: Option<i64>,

        #[arg(long)]
        resource_id: Option<i64>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,
    },

    /// Update a daily task
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        title: Option<String>,

        /// dd/MM/yyyy; an empty value clears it
        #[arg(long)]
        end_date: Option<String>,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum ImpedimentCommands {
    /// Record an impediment
    Create {
        #[arg(long)]
        project_id: i64,

        #[arg(long)]
        resource_id: i64,

        #[arg(long)]
        impediment: String,

        #[arg(long)]
        explanation: String,
    },

    /// List impediments; filters combine
    List {
        #[arg(long)]
        id: Option<i64>,

        #[arg(long)]
        project_id: Option<i64>,

        #[arg(long)]
        resource_id: Option<i64>,

        /// Case-insensitive substring of the impediment
        #[arg(long)]
        text: Option<String>,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,
    },

    /// Update an impediment
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        impediment: Option<String>,

        #[arg(long)]
        explanation: Option<String>,

        /// dd/MM/yyyy; an empty value clears it
        #[arg(long)]
        end_date: Option<String>,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,
    },
}

pub fn run_tasks(cmd: DailyTaskCommands, ctx: &Context) -> Result<()> {
    let tracker = &ctx.tracker;
    let tasks = match cmd {
        DailyTaskCommands::Create {
            project_id,
            resource_id,
            title,
            end_date,
        } => {
            let task = tracker.create_daily_task(CreateDailyTaskInput {
                project_id,
                resource_id,
                title,
                created_at: None,
                end_date,
                active: None,
            })?;
            println!("Created daily task {}", task.id);
            vec![task]
        }
        DailyTaskCommands::List {
            id,
            project_id,
            resource_id,
            title,
            active,
        } => tracker.list_daily_tasks(&DailyTaskFilter {
            id,
            project_id,
            resource_id,
            active,
            title,
        })?,
        DailyTaskCommands::Update {
            id,
            title,
            end_date,
            active,
        } => {
            let task = tracker.update_daily_task(
                id,
                UpdateDailyTaskInput {
                    title,
                    end_date,
                    active,
                },
            )?;
            println!("Updated daily task {}", task.id);
            vec![task]
        }
    };

    let projects = Names::projects(tracker)?;
    let resources = Names::resources(tracker)?;
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                projects.get(t.project_id),
                resources.get(t.resource_id),
                t.title.clone(),
                t.created_at.clone(),
                or_dash(t.end_date.as_deref()),
                yes_no(t.active),
            ]
        })
        .collect();
    print_table(
        &["id", "project", "resource", "title", "created", "end", "active"],
        &rows,
    );
    Ok(())
}

pub fn run_impediments(cmd: ImpedimentCommands, ctx: &Context) -> Result<()> {
    let tracker = &ctx.tracker;
    let impediments = match cmd {
        ImpedimentCommands::Create {
            project_id,
            resource_id,
            impediment,
            explanation,
        } => {
            let row = tracker.create_impediment(CreateImpedimentInput {
                project_id,
                resource_id,
                impediment,
                explanation,
                created_at: None,
                end_date: None,
                active: None,
            })?;
            println!("Created impediment {}", row.id);
            vec![row]
        }
        ImpedimentCommands::List {
            id,
            project_id,
            resource_id,
            text,
            active,
        } => tracker.list_impediments(&ImpedimentFilter {
            id,
            project_id,
            resource_id,
            active,
            text,
        })?,
        ImpedimentCommands::Update {
            id,
            impediment,
            explanation,
            end_date,
            active,
        } => {
            let row = tracker.update_impediment(
                id,
                UpdateImpedimentInput {
                    impediment,
                    explanation,
                    end_date,
                    active,
                },
            )?;
            println!("Updated impediment {}", row.id);
            vec![row]
        }
    };

    let projects = Names::projects(tracker)?;
    let resources = Names::resources(tracker)?;
    let rows: Vec<Vec<String>> = impediments
        .iter()
        .map(|i| {
            vec![
                i.id.to_string(),
                projects.get(i.project_id),
                resources.get(i.resource_id),
                i.impediment.clone(),
                i.explanation.clone(),
                or_dash(i.end_date.as_deref()),
                yes_no(i.active),
            ]
        })
        .collect();
    print_table(
        &[
            "id",
            "project",
            "resource",
            "impediment",
            "explanation",
            "end",
            "active",
        ],
        &rows,
    );
    Ok(())
}
