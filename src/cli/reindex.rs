use anyhow::Result;

use super::AppContext;

/// Rebuild the stats index from the report list
pub fn reindex_command(ctx: &AppContext) -> Result<()> {
    let reports = ctx.reports.all()?;
    let count = ctx.stats.recorder().rebuild(&reports)?;
    println!("Indexed {count} report(s)");
    Ok(())
}
