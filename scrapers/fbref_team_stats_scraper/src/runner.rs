use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

use crate::{
    config::ScraperConfig,
    fetcher::PageSource,
    league::generate_urls,
    normalizer::normalize,
    output::{historical_path, snapshot_path, write_dataset},
    types::TeamSeasonRecord,
};

/// Fetches and normalizes every URL in order. The first failure aborts the
/// whole batch; nothing is returned for the pages that did succeed.
pub fn scrape_all<S: PageSource>(source: &mut S, urls: &[String]) -> Result<Vec<TeamSeasonRecord>> {
    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pages ({eta})")?,
    );

    let mut records = Vec::new();
    for url in urls {
        let tables = source.fetch_tables(url)?;
        let page_records =
            normalize(&tables).with_context(|| format!("Failed to normalize tables from {}", url))?;
        info!("{} records from {}", page_records.len(), url);
        records.extend(page_records);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    Ok(records)
}

/// Every league and season in the catalog, written to one file.
pub fn run_historical<S: PageSource>(config: &ScraperConfig, source: &mut S) -> Result<PathBuf> {
    let urls = generate_urls(&config.catalog);
    info!("Scraping {} season pages", urls.len());

    let records = scrape_all(source, &urls)?;

    let path = historical_path(&config.output.data_dir);
    write_dataset(&path, &records)?;
    Ok(path)
}

/// One league's season in progress, in a file named after `date`.
pub fn run_current<S: PageSource>(
    config: &ScraperConfig,
    source: &mut S,
    league_code: &str,
    date: NaiveDate,
) -> Result<PathBuf> {
    let catalog = &config.catalog;
    let league = catalog
        .league_by_code(league_code)
        .ok_or_else(|| anyhow!("League {} is not in the catalog", league_code))?;
    let url = catalog.current_season_url(league);
    let records = scrape_all(source, &[url])?;

    let path = snapshot_path(&config.output.data_dir, &league.code, date);
    write_dataset(&path, &records)?;
    Ok(path)
}
