//! Legend command: the class table for writers and plotters.

use anyhow::{Context, Result};
use tracing::info;

use koppen_classify::legend;

use crate::cli::LegendArgs;
use crate::document::{LegendRow, write_json};

/// Print or write the class table.
pub fn run(args: LegendArgs) -> Result<()> {
    let rows: Vec<LegendRow> = legend().into_iter().map(Into::into).collect();
    match args.output {
        Some(path) => {
            write_json(&path, &rows)?;
            info!(path = %path.display(), n_rows = rows.len(), "legend written");
        }
        None => {
            let json = serde_json::to_string_pretty(&rows).context("failed to serialize legend")?;
            println!("{json}");
        }
    }
    Ok(())
}
