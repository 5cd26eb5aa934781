//! Turns the statistics tables of one fbref season page into one
//! [`TeamSeasonRecord`] per squad.
//!
//! Seven squad tables are read, each through a fixed projection from its
//! two-level headers onto [`StatField`]s. The projections are outer-joined on
//! the squad name, season totals are divided by matches played and the result
//! is emitted in [`StatField::OUTPUT`] order without the squad itself.

use std::collections::HashMap;

use regex::Regex;
use tracing::{info, warn};

use crate::{
    tables::{ColumnKey, PageTables, RawTable, TableError},
    types::{StatField, TeamSeasonRecord},
};

const SQUAD: &str = "Squad";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTable {
    Standings,
    Goalkeeping,
    Shooting,
    Passing,
    DefensiveActions,
    Possession,
    Miscellaneous,
}

impl SubTable {
    pub const ALL: [SubTable; 7] = [
        SubTable::Standings,
        SubTable::Goalkeeping,
        SubTable::Shooting,
        SubTable::Passing,
        SubTable::DefensiveActions,
        SubTable::Possession,
        SubTable::Miscellaneous,
    ];

    /// Where the table sits on a season page that carries no table ids.
    pub fn legacy_position(self) -> usize {
        match self {
            SubTable::Standings => 0,
            SubTable::Goalkeeping => 4,
            SubTable::Shooting => 8,
            SubTable::Passing => 10,
            SubTable::DefensiveActions => 16,
            SubTable::Possession => 18,
            SubTable::Miscellaneous => 22,
        }
    }

    pub fn table_id(self) -> &'static str {
        match self {
            SubTable::Standings => "results_overall",
            SubTable::Goalkeeping => "stats_squads_keeper_for",
            SubTable::Shooting => "stats_squads_shooting_for",
            SubTable::Passing => "stats_squads_passing_for",
            SubTable::DefensiveActions => "stats_squads_defense_for",
            SubTable::Possession => "stats_squads_possession_for",
            SubTable::Miscellaneous => "stats_squads_misc_for",
        }
    }

    /// The standings id embeds season and competition, e.g.
    /// `results2022-202391_overall`.
    pub fn matches_id(self, id: &str) -> bool {
        match self {
            SubTable::Standings => Regex::new(r"^results[\d-]*_overall$")
                .unwrap()
                .is_match(id),
            _ => id == self.table_id(),
        }
    }

    /// Columns read from the table, keyed by (over-header, header).
    pub fn projection(self) -> Vec<(ColumnKey, StatField)> {
        let column = |group: Option<&str>, name: &str, field| (ColumnKey::new(group, name), field);
        match self {
            SubTable::Standings => vec![
                column(None, "MP", StatField::MatchesPlayed),
                column(None, "Pts/MP", StatField::PointsPerMatch),
            ],
            SubTable::Goalkeeping => vec![
                column(Some("Performance"), "GA", StatField::GoalsAgainst),
                column(Some("Performance"), "Save%", StatField::SavePct),
            ],
            SubTable::Shooting => vec![
                column(Some("Standard"), "Gls", StatField::Goals),
                column(Some("Standard"), "Sh/90", StatField::ShotsPer90),
                column(Some("Standard"), "Dist", StatField::AvgShotDistance),
                column(Some("Standard"), "PKatt", StatField::PenaltyAttempts),
            ],
            SubTable::Passing => vec![
                column(None, "Ast", StatField::Assists),
                column(Some("Total"), "Cmp", StatField::PassesCompleted),
                column(Some("Total"), "Cmp%", StatField::PassCompletionPct),
                column(Some("Total"), "PrgDist", StatField::ProgressivePassDistance),
            ],
            SubTable::DefensiveActions => vec![
                column(None, "Tkl+Int", StatField::TacklesInterceptions),
                column(None, "Err", StatField::Errors),
            ],
            SubTable::Possession => vec![
                column(Some("Touches"), "Att 3rd", StatField::AttackingThirdTouches),
                column(Some("Carries"), "TotDist", StatField::CarryDistance),
            ],
            SubTable::Miscellaneous => vec![
                column(Some("Performance"), "Fls", StatField::Fouls),
                column(Some("Aerial Duels"), "Won%", StatField::AerialDuelsWonPct),
            ],
        }
    }
}

/// Finds a sub-table by its id, or by its legacy position when the page has
/// no ids at all.
pub fn select_table(page: &PageTables, sub_table: SubTable) -> Result<&RawTable, TableError> {
    if page.has_identifiers() {
        return page
            .find(|id| sub_table.matches_id(id))
            .ok_or_else(|| TableError::MissingTable(sub_table.table_id().to_string()));
    }

    page.get(sub_table.legacy_position())
        .ok_or_else(|| TableError::MissingTable(format!("#{}", sub_table.legacy_position())))
}

fn parse_stat(table: &RawTable, key: &ColumnKey, raw: &str) -> Result<f64, TableError> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return Ok(f64::NAN);
    }
    cleaned.parse::<f64>().map_err(|_| TableError::InvalidNumber {
        table: table.label(),
        column: key.to_string(),
        value: raw.to_string(),
    })
}

/// Squad rows keyed by name, in first-seen order.
#[derive(Debug, Default)]
struct SquadJoin {
    order: Vec<String>,
    rows: HashMap<String, [f64; StatField::COUNT]>,
}

impl SquadJoin {
    fn row_mut(&mut self, squad: &str) -> &mut [f64; StatField::COUNT] {
        if !self.rows.contains_key(squad) {
            self.order.push(squad.to_string());
        }
        self.rows
            .entry(squad.to_string())
            .or_insert([f64::NAN; StatField::COUNT])
    }

    fn merge(&mut self, sub_table: SubTable, table: &RawTable) -> Result<(), TableError> {
        let squad_key = ColumnKey::new(None, SQUAD);
        let squad_index = table
            .column_index(&squad_key)
            .ok_or_else(|| TableError::MissingColumn {
                table: table.label(),
                column: squad_key.to_string(),
            })?;

        let mut columns = Vec::new();
        for (key, field) in sub_table.projection() {
            let index = table
                .column_index(&key)
                .ok_or_else(|| TableError::MissingColumn {
                    table: table.label(),
                    column: key.to_string(),
                })?;
            columns.push((key, index, field));
        }

        let mut seen = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let squad = row.get(squad_index).map(String::as_str).unwrap_or_default();
            if squad.is_empty() {
                continue;
            }
            if seen.contains(&squad) {
                return Err(TableError::DuplicateSquad {
                    table: table.label(),
                    squad: squad.to_string(),
                });
            }
            seen.push(squad);

            let mut values = Vec::with_capacity(columns.len());
            for (key, index, field) in &columns {
                let raw = row.get(*index).map(String::as_str).unwrap_or_default();
                values.push((*field, parse_stat(table, key, raw)?));
            }
            let joined = self.row_mut(squad);
            for (field, value) in values {
                joined[field.index()] = value;
            }
        }
        Ok(())
    }

    fn into_records(self) -> Vec<TeamSeasonRecord> {
        let SquadJoin { order, mut rows } = self;
        order
            .iter()
            .filter_map(|squad| rows.remove(squad))
            .map(|row| {
                let matches_played = row[StatField::MatchesPlayed.index()];
                let mut values = [f64::NAN; 17];
                for (slot, field) in values.iter_mut().zip(StatField::OUTPUT) {
                    let value = row[field.index()];
                    *slot = if field.is_cumulative() {
                        value / matches_played
                    } else {
                        value
                    };
                }
                TeamSeasonRecord::from_values(values)
            })
            .collect()
    }
}

/// Normalizes one season page into per-team records.
///
/// Every squad found in any of the seven tables yields exactly one record;
/// values from tables that lack the squad are NaN. Cumulative columns are
/// divided by matches played without guarding against zero.
pub fn normalize(page: &PageTables) -> Result<Vec<TeamSeasonRecord>, TableError> {
    if !page.has_identifiers() {
        warn!(
            "Page has no table ids, selecting {} tables by position",
            SubTable::ALL.len()
        );
    }

    let mut join = SquadJoin::default();
    for sub_table in SubTable::ALL {
        let table = select_table(page, sub_table)?;
        join.merge(sub_table, table)?;
    }

    let records = join.into_records();
    info!("Normalized {} team records", records.len());
    Ok(records)
}
