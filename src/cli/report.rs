//! Report and suggestion commands

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use clap::Subcommand;

use super::Context;
use crate::ai::{self, AiClient};
use crate::dates;
use crate::report::{ReportConfig, ReportGenerator, ReportRequest};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Print the daily report and save it as reporte_{yyyy-MM-dd}.md
    Generate {
        /// Report date, dd/MM/yyyy (default today)
        #[arg(long)]
        date: Option<String>,

        /// Only this project; wins over --project-name
        #[arg(long)]
        project_id: Option<i64>,

        /// Projects whose name contains this text (case-insensitive)
        #[arg(long)]
        project_name: Option<String>,
    },
}

pub fn run(cmd: ReportCommands, ctx: &Context) -> Result<()> {
    match cmd {
        ReportCommands::Generate {
            date,
            project_id,
            project_name,
        } => {
            let date = resolve_date(date.as_deref());
            let generator = ReportGenerator::new(ReportConfig::from(&ctx.config));
            let report = generator.generate_daily_report(
                ctx.tracker.database(),
                &ReportRequest {
                    date: Some(date),
                    project_id,
                    project_name,
                },
            )?;

            print!("{}", report);
            let path = save_report(&ctx.config.reports_dir, date, &report)?;
            println!("Report saved to {}", path.display());
        }
    }
    Ok(())
}

/// An unparsable `--date` is not fatal; the report falls back to today.
fn resolve_date(raw: Option<&str>) -> NaiveDate {
    let Some(raw) = raw else {
        return dates::today();
    };
    match dates::parse_date(raw) {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid --date, using today");
            eprintln!("Warning: {}; using today's date", e);
            dates::today()
        }
    }
}

pub fn report_file_name(date: NaiveDate) -> String {
    format!("reporte_{}.md", date.format("%Y-%m-%d"))
}

fn save_report(dir: &Path, date: NaiveDate, report: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    let path = dir.join(report_file_name(date));
    std::fs::write(&path, report).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Saved report");
    Ok(path)
}

pub async fn suggest(ctx: &Context, save: bool) -> Result<()> {
    let work = ai::collect_active_work(ctx.tracker.database(), dates::today())?;
    if work.is_empty() {
        println!("No active work to analyze.");
        return Ok(());
    }
    println!("Found {} project(s) with active work.", work.len());

    let prompt = ai::build_prompt(&work);
    let client = AiClient::new(ctx.config.ai.clone());
    let suggestions = client.complete(&prompt).await?;

    println!();
    println!("{}", suggestions);

    if save {
        let path = ai::save_suggestions(
            &ctx.config.suggestions_dir,
            &suggestions,
            Local::now().naive_local(),
        )?;
        println!("Suggestions saved to {}", path.display());
    }
    Ok(())
}
