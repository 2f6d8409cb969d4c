//! Report commands

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde_json::{Map, Value};

use fieldcri::stats::format_duration_opt;
use fieldcri::validation::validate;
use fieldcri::{CriKind, CriReport};

use super::AppContext;

/// Validate a form read from `file` and save it as a new report
pub fn new_command(ctx: &AppContext, kind: CriKind, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read form: {}", file.display()))?;
    let fields: Map<String, Value> = serde_json::from_str(&content)
        .with_context(|| format!("Form must be a JSON object: {}", file.display()))?;

    if let Err(errors) = validate(kind, &fields) {
        for error in &errors.errors {
            eprintln!("  {}: {}", error.field, error.message);
        }
        bail!("Report rejected ({} invalid field(s))", errors.len());
    }

    let report = ctx.reports.save(CriReport::new(kind, fields))?;
    // The list is the source of truth; a stale index is fixed by `reindex`
    if let Err(e) = ctx.stats.recorder().record_report(&report) {
        tracing::warn!(id = %report.id, error = %e, "Failed to index report");
    }

    println!("{} ({})", report.numero_cri, report.id);
    Ok(())
}

pub fn list_command(ctx: &AppContext, kind: Option<CriKind>) -> Result<()> {
    let reports = ctx.reports.list(kind)?;
    if reports.is_empty() {
        println!("No reports found.");
        return Ok(());
    }

    println!("Reports ({}):\n", reports.len());
    for report in reports {
        println!(
            "  {} [{}] {} - {} ({})",
            report.numero_cri,
            report.kind,
            report
                .created_at
                .map_or_else(|| "-".to_string(), |ts| ts.format("%Y-%m-%d %H:%M").to_string()),
            report.site_name().unwrap_or("-"),
            format_duration_opt(report.to_record().duration_minutes()),
        );
        if let Some(client) = report.client_name() {
            println!("    Client: {client}");
        }
        if let Some(status) = report.status() {
            println!("    Status: {status}");
        }
    }
    Ok(())
}

pub fn show_command(ctx: &AppContext, id: &str) -> Result<()> {
    let Some(report) = ctx.reports.get(id)? else {
        bail!("Report not found: {id}");
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn delete_command(ctx: &AppContext, id: &str) -> Result<()> {
    if !ctx.reports.delete(id)? {
        bail!("Report not found: {id}");
    }
    if let Err(e) = ctx.stats.recorder().remove_report(id) {
        tracing::warn!(id, error = %e, "Failed to remove report from index");
    }
    println!("Deleted {id}");
    Ok(())
}

pub fn number_command(ctx: &AppContext, kind: CriKind) -> Result<()> {
    println!("{}", ctx.reports.next_number(kind, Utc::now().date_naive())?);
    Ok(())
}
