use std::path::Path;

use anyhow::Context;
use cfgdiff_core::{diff_values, DiffRecord, DiffStatus, DiffSummary};
use cfgdiff_view::{Panel, SplitView, ViewerConfig};
use colored::{ColoredString, Colorize};
use serde_json::Value;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, cli.format),
        Command::Panels(args) => cmd_panels(args, cli.format),
    }
}

fn read_snapshot(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let old = read_snapshot(&args.old)?;
    let new = read_snapshot(&args.new)?;
    let records = diff_values(&new, &old);
    let summary = DiffSummary::from_records(&records);
    let shown = visible_records(records, args.all);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
        OutputFormat::Text => {
            for line in diff_text_lines(&shown, &summary, args.all) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn cmd_panels(args: PanelsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    let old = read_snapshot(&args.old)?;
    let new = read_snapshot(&args.new)?;
    let view = SplitView::build(&diff_values(&new, &old), &config);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => {
            print_panel(&view.left);
            println!();
            print_panel(&view.right);
        }
    }
    Ok(())
}

fn diff_text_lines(shown: &[DiffRecord], summary: &DiffSummary, all: bool) -> Vec<String> {
    if !all && !summary.has_changes() {
        return vec!["No changes.".to_string()];
    }
    let mut lines: Vec<String> = shown.iter().map(record_line).collect();
    lines.push(format!(
        "\n{} added, {} removed, {} changed, {} unchanged",
        summary.added.to_string().green(),
        summary.removed.to_string().red(),
        summary.changed.to_string().yellow(),
        summary.unchanged.to_string().dimmed(),
    ));
    lines
}

fn visible_records(records: Vec<DiffRecord>, all: bool) -> Vec<DiffRecord> {
    if all {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.status != DiffStatus::Unchanged)
        .collect()
}

fn marker(status: DiffStatus) -> ColoredString {
    match status {
        DiffStatus::Added => "+".green().bold(),
        DiffStatus::Removed => "-".red().bold(),
        DiffStatus::Changed => "~".yellow().bold(),
        DiffStatus::Unchanged => " ".normal(),
    }
}

fn record_line(record: &DiffRecord) -> String {
    let old = record.old_value.as_deref().unwrap_or_default();
    let new = record.new_value.as_deref().unwrap_or_default();
    let detail = match record.status {
        DiffStatus::Added => new.green().to_string(),
        DiffStatus::Removed => old.red().to_string(),
        DiffStatus::Changed => format!("{} → {}", old.red(), new.green()),
        DiffStatus::Unchanged => old.dimmed().to_string(),
    };
    format!("{} {}: {}", marker(record.status), record.key.bold(), detail)
}

fn print_panel(panel: &Panel) {
    println!("{}", panel.title.bold().underline());
    if panel.is_empty() {
        println!("  {}", "(empty)".dimmed());
    }
    for row in &panel.rows {
        println!("{:>4}  {} {}", row.number.to_string().dimmed(), marker(row.status), row.label());
    }
}
