use serde::{Deserialize, Serialize};
use std::fmt;

pub const FBREF_COMPS_URL: &str = "https://fbref.com/en/comps/";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct League {
    /// Short code used in snapshot file names, e.g. `epl`.
    pub code: String,
    /// fbref competition id, the path segment after `/comps/`.
    pub comp_id: u32,
    /// Name as it appears in the page slug, e.g. `Premier-League`.
    pub name: String,
}

impl League {
    pub fn new(code: &str, comp_id: u32, name: &str) -> Self {
        Self {
            code: code.to_string(),
            comp_id,
            name: name.to_string(),
        }
    }

    fn stats_suffix(&self) -> String {
        format!("{}-Stats", self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Season {
    pub start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn end_year(&self) -> i32 {
        self.start_year + 1
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start_year, self.end_year())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Leagues and the trailing window of seasons to scrape for each of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonCatalog {
    pub base_url: String,
    pub leagues: Vec<League>,
    /// Calendar year in which the most recent season ends.
    pub end_year: i32,
    /// Number of seasons ending at or before `end_year`.
    pub year_span: u32,
}

impl Default for SeasonCatalog {
    fn default() -> Self {
        Self {
            base_url: FBREF_COMPS_URL.to_string(),
            leagues: vec![
                League::new("epl", 9, "Premier-League"),
                League::new("laliga", 12, "La-Liga"),
                League::new("seriea", 11, "Serie-A"),
                League::new("bundesliga", 20, "Bundesliga"),
                League::new("ligue1", 13, "Ligue-1"),
            ],
            end_year: 2023,
            year_span: 6,
        }
    }
}

impl SeasonCatalog {
    /// Seasons in ascending order, the last one ending in `end_year`.
    pub fn seasons(&self) -> Vec<Season> {
        let first = self.end_year - self.year_span as i32;
        (first..self.end_year).map(Season::new).collect()
    }

    pub fn league_by_code(&self, code: &str) -> Option<&League> {
        self.leagues.iter().find(|league| league.code == code)
    }

    pub fn season_url(&self, league: &League, season: Season) -> String {
        let label = season.label();
        format!(
            "{}{}/{}/{}-{}",
            self.base_url,
            league.comp_id,
            label,
            label,
            league.stats_suffix()
        )
    }

    /// Page for the season currently in progress; fbref serves it without a
    /// season segment.
    pub fn current_season_url(&self, league: &League) -> String {
        format!("{}{}/{}", self.base_url, league.comp_id, league.stats_suffix())
    }
}

/// Every season page in the catalog, league-major and season-minor.
pub fn generate_urls(catalog: &SeasonCatalog) -> Vec<String> {
    let seasons = catalog.seasons();
    catalog
        .leagues
        .iter()
        .flat_map(|league| {
            seasons
                .iter()
                .map(move |season| catalog.season_url(league, *season))
        })
        .collect()
}
