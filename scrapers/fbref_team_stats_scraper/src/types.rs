/// Every statistic the normalizer carries through the squad join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    MatchesPlayed,
    PointsPerMatch,
    Goals,
    GoalsAgainst,
    Assists,
    ShotsPer90,
    AvgShotDistance,
    PenaltyAttempts,
    PassesCompleted,
    PassCompletionPct,
    ProgressivePassDistance,
    AttackingThirdTouches,
    CarryDistance,
    TacklesInterceptions,
    Errors,
    SavePct,
    Fouls,
    AerialDuelsWonPct,
}

impl StatField {
    pub const COUNT: usize = 18;

    /// Output schema, in column order. Matches played is only a divisor.
    pub const OUTPUT: [StatField; 17] = [
        StatField::PointsPerMatch,
        StatField::Goals,
        StatField::GoalsAgainst,
        StatField::Assists,
        StatField::ShotsPer90,
        StatField::AvgShotDistance,
        StatField::PenaltyAttempts,
        StatField::PassesCompleted,
        StatField::PassCompletionPct,
        StatField::ProgressivePassDistance,
        StatField::AttackingThirdTouches,
        StatField::CarryDistance,
        StatField::TacklesInterceptions,
        StatField::Errors,
        StatField::SavePct,
        StatField::Fouls,
        StatField::AerialDuelsWonPct,
    ];

    /// Season totals that get turned into per-match rates.
    pub const CUMULATIVE: [StatField; 11] = [
        StatField::Goals,
        StatField::GoalsAgainst,
        StatField::Assists,
        StatField::PenaltyAttempts,
        StatField::PassesCompleted,
        StatField::ProgressivePassDistance,
        StatField::TacklesInterceptions,
        StatField::Errors,
        StatField::AttackingThirdTouches,
        StatField::CarryDistance,
        StatField::Fouls,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_cumulative(self) -> bool {
        Self::CUMULATIVE.contains(&self)
    }

    /// fbref's column label, also used as the CSV header.
    pub fn header(self) -> &'static str {
        match self {
            StatField::MatchesPlayed => "MP",
            StatField::PointsPerMatch => "Pts/MP",
            StatField::Goals => "Gls",
            StatField::GoalsAgainst => "GA",
            StatField::Assists => "Ast",
            StatField::ShotsPer90 => "Sh/90",
            StatField::AvgShotDistance => "Dist",
            StatField::PenaltyAttempts => "PKatt",
            StatField::PassesCompleted => "Cmp",
            StatField::PassCompletionPct => "Cmp%",
            StatField::ProgressivePassDistance => "PrgDist",
            StatField::AttackingThirdTouches => "Att 3rd",
            StatField::CarryDistance => "TotDist",
            StatField::TacklesInterceptions => "Tkl+Int",
            StatField::Errors => "Err",
            StatField::SavePct => "Save%",
            StatField::Fouls => "Fls",
            StatField::AerialDuelsWonPct => "Won%",
        }
    }
}

pub fn output_columns() -> Vec<&'static str> {
    StatField::OUTPUT.iter().map(|field| field.header()).collect()
}

/// One team's season, normalized. Missing values are NaN; the team itself is
/// not identified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamSeasonRecord {
    values: [f64; 17],
}

impl TeamSeasonRecord {
    pub fn from_values(values: [f64; 17]) -> Self {
        Self { values }
    }

    pub fn get(&self, field: StatField) -> Option<f64> {
        StatField::OUTPUT
            .iter()
            .position(|f| *f == field)
            .map(|i| self.values[i])
    }

    pub fn values(&self) -> &[f64; 17] {
        &self.values
    }

    /// Values rendered for CSV: NaN is an empty field, whole numbers keep
    /// their decimal point (`2.0`, not `2`).
    pub fn to_csv_fields(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|value| {
                if value.is_nan() {
                    String::new()
                } else {
                    format!("{:?}", value)
                }
            })
            .collect()
    }
}
