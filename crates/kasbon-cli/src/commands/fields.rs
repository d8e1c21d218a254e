//! Fields command - list the field groups the engine recognizes.

use clap::Args;
use console::style;

use kasbon_core::supported_field_groups;

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// Emit the listing as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: FieldsArgs) -> anyhow::Result<()> {
    let groups = supported_field_groups();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    for group in &groups {
        println!("{}", style(group.name).bold());
        for column in group.columns {
            println!("  {column}");
        }
    }

    let total: usize = groups.iter().map(|g| g.columns.len()).sum();
    println!();
    println!("{} {} columns in {} groups", style("ℹ").blue(), total, groups.len());

    Ok(())
}
