//! Project commands

use anyhow::Result;
use clap::Subcommand;

use super::{parse_flag, Context};
use crate::models::{CreateProjectInput, Project, UpdateProjectInput};
use crate::output::{or_dash, print_table, yes_no};

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// dd/MM/yyyy, defaults to today
        #[arg(long)]
        start_date: Option<String>,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,

        /// Include the stand-up section in daily reports
        #[arg(long, value_parser = parse_flag)]
        has_daily: Option<bool>,
    },

    /// List all projects
    List,

    /// Update a project; only the given fields change
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        name: Option<String>,

        /// An empty value clears the description
        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,

        #[arg(long, value_parser = parse_flag)]
        has_daily: Option<bool>,
    },
}

pub fn run(cmd: ProjectCommands, ctx: &Context) -> Result<()> {
    match cmd {
        ProjectCommands::Create {
            name,
            description,
            start_date,
            active,
            has_daily,
        } => {
            let project = ctx.tracker.create_project(CreateProjectInput {
                name,
                description,
                start_date,
                active,
                has_daily,
            })?;
            println!("Created project {}", project.id);
            show(&[project]);
        }
        ProjectCommands::List => show(&ctx.tracker.list_projects()?),
        ProjectCommands::Update {
            id,
            name,
            description,
            active,
            has_daily,
        } => {
            let project = ctx.tracker.update_project(
                id,
                UpdateProjectInput {
                    name,
                    description,
                    start_date: None,
                    active,
                    has_daily,
                },
            )?;
            println!("Updated project {}", project.id);
            show(&[project]);
        }
    }
    Ok(())
}

fn show(projects: &[Project]) {
    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                or_dash(p.description.as_deref()),
                p.start_date.clone(),
                yes_no(p.active),
                yes_no(p.has_daily),
            ]
        })
        .collect();

    print_table(
        &["id", "name", "description", "start", "active", "daily"],
        &rows,
    );
}
