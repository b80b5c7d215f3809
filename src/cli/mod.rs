//! Command-line interface.
//!
//! | Group | Verbs |
//! |-------|-------|
//! | `project`, `resource`, `task` | `create`, `list`, `update` |
//! | `resource-project`, `resource-task` | assignment `create`, `list`, `update` |
//! | `daily-task`, `impediment` | stand-up `create`, `list`, `update` |
//! | `report` | `generate` |
//! | `suggest` | AI suggestions, `--save` to keep them |
//!
//! Flags that take a boolean accept `0`/`1` as well as `true`/`false`.

mod assignment;
mod daily;
mod project;
mod report;
mod resource;
mod task;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::services::Tracker;

pub use assignment::{ResourceProjectCommands, ResourceTaskCommands};
pub use daily::{DailyTaskCommands, ImpedimentCommands};
pub use project::ProjectCommands;
pub use report::ReportCommands;
pub use resource::ResourceCommands;
pub use task::TaskCommands;

#[derive(Parser)]
#[command(name = "dtrack")]
#[command(about = "Track projects, tasks and stand-ups; generate daily Markdown reports")]
#[command(version)]
pub struct Cli {
    /// Extra TOML config file, applied over every other source
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Manage resources (team members)
    #[command(subcommand)]
    Resource(ResourceCommands),

    /// Assign resources to projects
    #[command(subcommand)]
    ResourceProject(ResourceProjectCommands),

    /// Manage project tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Assign resources to tasks
    #[command(subcommand)]
    ResourceTask(ResourceTaskCommands),

    /// Manage stand-up tasks
    #[command(subcommand)]
    DailyTask(DailyTaskCommands),

    /// Manage stand-up impediments
    #[command(subcommand)]
    Impediment(ImpedimentCommands),

    /// Daily reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Ask an AI model for management suggestions on open work
    Suggest {
        /// Also write the answer to a timestamped Markdown file
        #[arg(long)]
        save: bool,
    },
}

impl Commands {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Project(_) => "project",
            Commands::Resource(_) => "resource",
            Commands::ResourceProject(_) => "resource-project",
            Commands::Task(_) => "task",
            Commands::ResourceTask(_) => "resource-task",
            Commands::DailyTask(_) => "daily-task",
            Commands::Impediment(_) => "impediment",
            Commands::Report(_) => "report",
            Commands::Suggest { .. } => "suggest",
        }
    }
}

/// Everything a command needs once startup is done.
pub struct Context {
    pub tracker: Tracker,
    pub config: AppConfig,
}

pub async fn run(command: Commands, ctx: &Context) -> Result<()> {
    match command {
        Commands::Project(cmd) => project::run(cmd, ctx),
        Commands::Resource(cmd) => resource::run(cmd, ctx),
        Commands::ResourceProject(cmd) => assignment::run_project(cmd, ctx),
        Commands::Task(cmd) => task::run(cmd, ctx),
        Commands::ResourceTask(cmd) => assignment::run_task(cmd, ctx),
        Commands::DailyTask(cmd) => daily::run_tasks(cmd, ctx),
        Commands::Impediment(cmd) => daily::run_impediments(cmd, ctx),
        Commands::Report(cmd) => report::run(cmd, ctx),
        Commands::Suggest { save } => report::suggest(ctx, save).await,
    }
}

/// Parse `0`/`1`/`true`/`false` for flag arguments.
fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("expected 0 or 1, got '{}'", other)),
    }
}

/// id → display name, built once per listing.
struct Names(HashMap<i64, String>);

impl Names {
    fn projects(tracker: &Tracker) -> Result<Self> {
        Ok(Self(
            tracker
                .list_projects()?
                .into_iter()
                .map(|p| (p.id, p.name))
                .collect(),
        ))
    }

    fn resources(tracker: &Tracker) -> Result<Self> {
        Ok(Self(
            tracker
                .list_resources()?
                .into_iter()
                .map(|r| (r.id, r.name))
                .collect(),
        ))
    }

    fn tasks(tracker: &Tracker) -> Result<Self> {
        Ok(Self(
            tracker
                .list_tasks(&Default::default())?
                .into_iter()
                .map(|t| (t.id, t.title))
                .collect(),
        ))
    }

    fn get(&self, id: i64) -> String {
        self.0
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("#{}", id))
    }
}
