use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::types::{output_columns, TeamSeasonRecord};

pub const HISTORICAL_FILE: &str = "top5_leagues_data.csv";

pub fn historical_path(data_dir: &Path) -> PathBuf {
    data_dir.join(HISTORICAL_FILE)
}

/// e.g. `data/epl_2023-03-07.csv`
pub fn snapshot_path(data_dir: &Path, league_code: &str, date: NaiveDate) -> PathBuf {
    data_dir.join(format!("{}_{}.csv", league_code, date.format("%Y-%m-%d")))
}

/// Writes the records as CSV with a header row and no index column.
pub fn write_dataset(path: &Path, records: &[TeamSeasonRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    info!("Writing {} records to {:?}", records.len(), path);

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {:?}", path))?;
    wtr.write_record(output_columns())?;
    for record in records {
        wtr.write_record(record.to_csv_fields())?;
    }

    wtr.flush()?;
    Ok(())
}
