// Developer harness: load the CSV exports given on the command line and
// print an unfiltered dashboard snapshot as JSON.
use std::path::Path;

use anyhow::Context;
use tracing::info;

use engine::config::settings::EngineSettings;
use engine::services::DashboardService;
use shared::filter::FilterSelection;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: engine <Daily_Sales_Dump.csv> [Daily_SalesFunnel.csv ...]");
        std::process::exit(2);
    }

    let mut service = DashboardService::new(EngineSettings::default());
    for path in &paths {
        let summary = service
            .load_path(Path::new(path))
            .with_context(|| format!("failed to load '{path}'"))?;
        info!(
            path = %path,
            kind = ?summary.kind,
            records = summary.records_loaded,
            rows_skipped = summary.diagnostics.rows_skipped,
            date_failures = summary.diagnostics.date_failures,
            "loaded"
        );
    }

    let snapshot = service.snapshot(&FilterSelection::default());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
