//! Dashboard command

use std::sync::Arc;

use anyhow::Result;

use fieldcri::dashboard::{DashboardLoader, DashboardOptions, DashboardStatus, DashboardView, LoadOutcome};

use super::AppContext;

pub async fn dashboard_command(ctx: &AppContext, period: Option<String>, json: bool) -> Result<()> {
    let settings = &ctx.config.dashboard;
    let period = period.unwrap_or_else(|| settings.default_period.to_string());

    let loader = DashboardLoader::new(Arc::new(ctx.stats.query()), DashboardOptions::from(settings));
    let view = match loader.load(&period).await? {
        LoadOutcome::Applied(view) => view,
        // Only one load is ever in flight here
        LoadOutcome::Superseded { .. } => return Ok(()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

fn print_view(view: &DashboardView) {
    println!(
        "Tableau de bord - {} ({} au {})\n",
        view.period.label(),
        view.range.start.format("%d/%m/%Y"),
        view.range.end.format("%d/%m/%Y"),
    );

    if let Some(error) = &view.error {
        println!("  ! {error}\n");
    }
    if view.status == DashboardStatus::Empty {
        println!("  Aucune intervention sur la période.\n");
    }

    let stats = &view.global_stats;
    println!("  Interventions      {}", stats.total_interventions);
    println!("  Sites actifs       {}", stats.active_sites);
    println!("  Durée moyenne      {}", view.avg_duration_label());
    println!("  Taux de complétion {}", view.completion_label());

    if !view.top_sites.is_empty() {
        println!("\n  Top sites:");
        for (rank, site) in view.top_sites.iter().enumerate() {
            println!("    {}. {} ({})", rank + 1, site.site_name, site.intervention_count);
        }
    }

    if !view.bars.is_empty() {
        println!("\n  Types d'intervention:");
        for bar in &view.bars {
            println!("    {:<28} {:>4}  {}", bar.label, bar.value, bar.color);
        }
    }

    println!("\n  Évolution mensuelle:");
    for bucket in &view.monthly_series.buckets {
        println!("    {} {:>4} {}", bucket.month_label, bucket.count, "#".repeat(bucket.count.min(40) as usize));
    }
}
