use anyhow::Result;
use clap::Subcommand;

use super::{parse_flag, Context};
use crate::models::{CreateResourceInput, Resource, UpdateResourceInput};
use crate::output::{print_table, yes_no};

#[derive(Subcommand)]
pub enum ResourceCommands {
    /// Create a resource
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,
    },

    /// List all resources
    List,

    /// Update a resource
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_parser = parse_flag)]
        active: Option<bool>,
    },
}

pub fn run(cmd: ResourceCommands, ctx: &Context) -> Result<()> {
    match cmd {
        ResourceCommands::Create { name, active } => {
            let resource = ctx.tracker.create_resource(CreateResourceInput {
                name,
                active,
                created_at: None,
            })?;
            println!("Created resource {}", resource.id);
            show(&[resource]);
        }
        ResourceCommands::List => show(&ctx.tracker.list_resources()?),
        ResourceCommands::Update { id, name, active } => {
            let resource = ctx
                .tracker
                .update_resource(id, UpdateResourceInput { name, active })?;
            println!("Updated resource {}", resource.id);
            show(&[resource]);
        }
    }
    Ok(())
}

fn show(resources: &[Resource]) {
    let rows: Vec<Vec<String>> = resources
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.name.clone(),
                yes_no(r.active),
                r.created_at.clone(),
            ]
        })
        .collect();
    print_table(&["id", "name", "active", "created"], &rows);
}
