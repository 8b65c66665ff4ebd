//! Organization command implementations

use colored::Colorize;
use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::{CacheError, Error, Result};
use crate::models::{
    RootSummaryDisplay, UnitSummaryDisplay, node_rows, root_rows, root_summary_rows, tree_rows,
    unit_summary_rows,
};
use crate::output::formatters::format_epoch_local;
use crate::output::tree::{pluralise, render_snapshot, render_subtree};
use crate::output::{json, table};
use crate::tree::OrganizationSnapshot;

/// Totals reported after a refresh
#[derive(Debug, Serialize)]
struct RefreshReport<'a> {
    profile: &'a str,
    name: &'a str,
    roots: usize,
    units: usize,
    accounts: usize,
}

/// Summary command output in JSON
#[derive(Debug, Serialize)]
struct SummaryReport {
    roots: Vec<RootSummaryDisplay>,
    units: Vec<UnitSummaryDisplay>,
}

/// Run the refresh command
pub async fn refresh(ctx: &CommandContext) -> Result<()> {
    let snapshot = ctx.refresh().await?;
    let report = RefreshReport {
        profile: &snapshot.profile_key,
        name: &snapshot.display_name,
        roots: snapshot.roots.len(),
        units: snapshot.total_units(),
        accounts: snapshot.total_accounts(),
    };

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", json::format_snapshot_json(&report, &snapshot)?);
        }
        OutputFormat::Pretty | OutputFormat::Table => {
            println!(
                "{} Refreshed cache for {}: {} {}, {} {}, {} {}",
                "✓".green(),
                report.name.bold(),
                report.roots,
                pluralise(report.roots, "root"),
                report.units,
                pluralise(report.units, "OU"),
                report.accounts,
                pluralise(report.accounts, "account"),
            );
        }
    }

    Ok(())
}

/// Run the roots command
pub async fn roots(ctx: &CommandContext) -> Result<()> {
    let snapshot = ctx.snapshot().await?;
    let rows = root_rows(&snapshot);

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_snapshot_json(&rows, &snapshot)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{}", table::format_table(&rows, "No roots found."));
        }
    }

    Ok(())
}

/// Run the summary command
pub async fn summary(ctx: &CommandContext) -> Result<()> {
    let snapshot = ctx.snapshot().await?;
    let roots = root_summary_rows(&snapshot);
    let units = unit_summary_rows(&snapshot);

    match ctx.format {
        OutputFormat::Json => {
            let report = SummaryReport { roots, units };
            println!("{}", json::format_snapshot_json(&report, &snapshot)?);
        }
        OutputFormat::Pretty | OutputFormat::Table => {
            println!();
            println!("{}", heading(&snapshot).bold());
            println!();
            println!("{}", table::format_table(&roots, "No roots found."));
            println!();
            println!(
                "{}",
                table::format_table(&units, "No organizational units found.")
            );
        }
    }

    Ok(())
}

/// Run the tree command, optionally limited to the subtree under `unit`
pub async fn tree(ctx: &CommandContext, unit: Option<&str>) -> Result<()> {
    let snapshot = ctx.snapshot().await?;

    let Some(unit) = unit else {
        match ctx.format {
            OutputFormat::Pretty => print!("{}", render_snapshot(&snapshot)),
            OutputFormat::Table => {
                println!("{}", table::format_table(&tree_rows(&snapshot), "No roots found."));
            }
            OutputFormat::Json => println!("{}", json::format_snapshot_json(&snapshot, &snapshot)?),
        }
        return Ok(());
    };

    let node = snapshot
        .find(unit)
        .ok_or_else(|| Error::UnitNotFound(unit.to_string()))?;

    match ctx.format {
        OutputFormat::Pretty => print!("{}", render_subtree(node)),
        OutputFormat::Table => println!("{}", table::format_table(&node_rows(node), "")),
        OutputFormat::Json => println!("{}", json::format_snapshot_json(node, &snapshot)?),
    }

    Ok(())
}

/// Run the dump command: the snapshot exactly as cached
pub async fn dump(ctx: &CommandContext, as_json: bool) -> Result<()> {
    let snapshot = ctx.snapshot().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let yaml =
            serde_yaml::to_string(&snapshot).map_err(|e| CacheError::Serialize(e.to_string()))?;
        print!("{}", yaml);
    }

    Ok(())
}

fn heading(snapshot: &OrganizationSnapshot) -> String {
    match snapshot.timestamp {
        Some(ts) => format!(
            "Organisation: {} (cached {})",
            snapshot.display_name,
            format_epoch_local(ts)
        ),
        None => format!("Organisation: {}", snapshot.display_name),
    }
}
