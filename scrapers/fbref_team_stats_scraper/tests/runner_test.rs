use anyhow::{bail, Result};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::fs;

use fbref_team_stats_scraper::{
    config::ScraperConfig,
    fetcher::{HttpPageSource, PageSource},
    league::{generate_urls, League, SeasonCatalog},
    runner::{run_current, run_historical, scrape_all},
    tables::PageTables,
};

const SEASON_PAGE: &str = include_str!("fixtures/season_page.html");
const HEADER: &str =
    "Pts/MP,Gls,GA,Ast,Sh/90,Dist,PKatt,Cmp,Cmp%,PrgDist,Att 3rd,TotDist,Tkl+Int,Err,Save%,Fls,Won%";

/// Serves the fixture page for every URL and remembers what was asked for.
struct FixtureSource {
    requested: Vec<String>,
    fail_on: Option<usize>,
}

impl FixtureSource {
    fn new(fail_on: Option<usize>) -> Self {
        Self {
            requested: Vec::new(),
            fail_on,
        }
    }
}

impl PageSource for FixtureSource {
    fn fetch_tables(&mut self, url: &str) -> Result<PageTables> {
        self.requested.push(url.to_string());
        if self.fail_on == Some(self.requested.len() - 1) {
            bail!("connection reset fetching {}", url);
        }
        Ok(PageTables::from_html(SEASON_PAGE)?)
    }
}

fn test_config(base_url: &str, data_dir: &std::path::Path) -> ScraperConfig {
    let mut config = ScraperConfig::default();
    config.rate_limits.requests_per_second = 50;
    config.output.data_dir = data_dir.to_path_buf();
    config.catalog = SeasonCatalog {
        base_url: base_url.to_string(),
        leagues: vec![League::new("epl", 9, "Premier-League")],
        end_year: 2023,
        year_span: 2,
    };
    config
}

#[test_log::test]
fn test_scrape_all_fetches_in_order_and_concatenates() {
    let urls = generate_urls(&SeasonCatalog::default());
    let mut source = FixtureSource::new(None);

    let records = scrape_all(&mut source, &urls).unwrap();

    assert_eq!(source.requested, urls);
    assert_eq!(records.len(), 3 * urls.len());
}

#[test_log::test]
fn test_scrape_all_aborts_on_first_failure() {
    let urls = generate_urls(&SeasonCatalog::default());
    let mut source = FixtureSource::new(Some(1));

    let err = scrape_all(&mut source, &urls).unwrap_err();

    assert!(err.to_string().contains("connection reset"));
    assert_eq!(source.requested.len(), 2);
}

#[test_log::test]
fn test_run_historical_over_http() {
    let mut server = mockito::Server::new();
    let first = server
        .mock("GET", "/comps/9/2021-2022/2021-2022-Premier-League-Stats")
        .with_status(200)
        .with_body(SEASON_PAGE)
        .expect(1)
        .create();
    let second = server
        .mock("GET", "/comps/9/2022-2023/2022-2023-Premier-League-Stats")
        .with_status(200)
        .with_body(SEASON_PAGE)
        .expect(1)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&format!("{}/comps/", server.url()), dir.path());
    let mut source = HttpPageSource::new(&config).unwrap();

    let path = run_historical(&config, &mut source).unwrap();

    first.assert();
    second.assert();
    assert_eq!(path, dir.path().join("top5_leagues_data.csv"));
    assert_eq!(source.metrics().total_requests, 2);

    let written = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 1 + 6);
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines[1], "2.0,2.0,1.2,1.5,15.0,17.2,0.3,500.0,85.0,2000.0,150.0,3000.0,20.0,0.5,70.0,10.0,55.0");
    assert_eq!(lines[3], ",,,,,,,,,,,,,,,,60.0");
    assert_eq!(lines[4], lines[1]);
}

#[test_log::test]
fn test_run_historical_writes_nothing_on_http_error() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/comps/9/2021-2022/2021-2022-Premier-League-Stats")
        .with_status(200)
        .with_body(SEASON_PAGE)
        .create();
    server
        .mock("GET", "/comps/9/2022-2023/2022-2023-Premier-League-Stats")
        .with_status(500)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&format!("{}/comps/", server.url()), dir.path());
    let mut source = HttpPageSource::new(&config).unwrap();

    let err = run_historical(&config, &mut source).unwrap_err();

    assert!(err.to_string().contains("HTTP 500"));
    assert!(!dir.path().join("top5_leagues_data.csv").exists());
}

#[test_log::test]
fn test_run_current_names_file_after_date() {
    let mut server = mockito::Server::new();
    let current = server
        .mock("GET", "/comps/9/Premier-League-Stats")
        .with_status(200)
        .with_body(SEASON_PAGE)
        .expect(1)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&format!("{}/comps/", server.url()), dir.path());
    let mut source = HttpPageSource::new(&config).unwrap();
    let date = NaiveDate::from_ymd_opt(2023, 3, 7).unwrap();

    let path = run_current(&config, &mut source, "epl", date).unwrap();

    current.assert();
    assert_eq!(path, dir.path().join("epl_2023-03-07.csv"));
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 1 + 3);
}

#[test]
fn test_run_current_unknown_league() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config("http://127.0.0.1:9/comps/", dir.path());
    let mut source = FixtureSource::new(None);
    let date = NaiveDate::from_ymd_opt(2023, 3, 7).unwrap();

    let err = run_current(&config, &mut source, "mls", date).unwrap_err();

    assert!(err.to_string().contains("mls"));
    assert!(source.requested.is_empty());
}
