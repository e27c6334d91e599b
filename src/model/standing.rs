use super::game::{GameRecord, GameResult};
use serde::{Deserialize, Deserializer, Serialize};

/// Round to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Cumulative league statistics for one player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAggregate {
    pub player: String,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals: u32,
    pub own_goals: u32,
    pub assists: u32,
    pub penalties: u32,
    pub total_points: u32,
    /// One decimal place
    pub points_per_game: f64,
    /// One decimal place
    pub win_percent: f64,
}

impl PlayerAggregate {
    /// An all-zero row for a player
    pub fn new(player: &str) -> Self {
        Self {
            player: player.to_string(),
            games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals: 0,
            own_goals: 0,
            assists: 0,
            penalties: 0,
            total_points: 0,
            points_per_game: 0.0,
            win_percent: 0.0,
        }
    }

    /// Add one appearance to the raw counters. Derived fields are left
    /// untouched until [`PlayerAggregate::finalize`].
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        match game.result {
            GameResult::Win => self.wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Loss => self.losses += 1,
        }
        self.goals += game.goals;
        self.own_goals += game.own_goals;
        self.assists += game.assists;
        self.penalties += game.penalties;
    }

    /// Compute points and rates from the final counters
    pub fn finalize(&mut self) {
        self.total_points = 3 * self.wins + self.draws;
        self.update_rates();
    }

    fn update_rates(&mut self) {
        if self.games == 0 {
            self.points_per_game = 0.0;
            self.win_percent = 0.0;
            return;
        }
        let games = self.games as f64;
        self.points_per_game = round_one_decimal(self.total_points as f64 / games);
        self.win_percent = round_one_decimal(100.0 * self.wins as f64 / games);
    }

    /// Build a row from a precomputed standings line.
    ///
    /// Games are taken as W + D + L; a listed points total overrides the
    /// computed one.
    pub fn from_standing(row: &StandingRow) -> Self {
        let mut agg = PlayerAggregate::new(row.player.trim());
        agg.wins = row.wins;
        agg.draws = row.draws;
        agg.losses = row.losses;
        agg.games = row.wins + row.draws + row.losses;
        agg.goals = row.goals;
        agg.own_goals = row.own_goals;
        agg.assists = row.assists;
        agg.penalties = row.penalties;

        if row.played != agg.games {
            log::debug!(
                "{}: P={} but W+D+L={}, using W+D+L",
                agg.player,
                row.played,
                agg.games
            );
        }

        agg.total_points = row.points.unwrap_or(3 * agg.wins + agg.draws);
        agg.update_rates();
        agg
    }
}

/// A row of the precomputed `LeagueTable` CSV
#[derive(Debug, Clone, Deserialize)]
pub struct StandingRow {
    #[serde(rename = "Player", alias = "Player Name")]
    pub player: String,
    #[serde(
        rename = "P",
        alias = "Appearances",
        default,
        deserialize_with = "lenient_count"
    )]
    pub played: u32,
    #[serde(
        rename = "W",
        alias = "Wins",
        default,
        deserialize_with = "lenient_count"
    )]
    pub wins: u32,
    #[serde(
        rename = "D",
        alias = "Draws",
        default,
        deserialize_with = "lenient_count"
    )]
    pub draws: u32,
    #[serde(
        rename = "L",
        alias = "Losses",
        default,
        deserialize_with = "lenient_count"
    )]
    pub losses: u32,
    #[serde(
        rename = "Gls",
        alias = "Goals",
        default,
        deserialize_with = "lenient_count"
    )]
    pub goals: u32,
    #[serde(
        rename = "Ast",
        alias = "Assists",
        default,
        deserialize_with = "lenient_count"
    )]
    pub assists: u32,
    #[serde(
        rename = "OG",
        alias = "Own Goals",
        default,
        deserialize_with = "lenient_count"
    )]
    pub own_goals: u32,
    #[serde(
        rename = "Pen",
        alias = "Penalties",
        default,
        deserialize_with = "lenient_count"
    )]
    pub penalties: u32,
    #[serde(
        rename = "Pts",
        alias = "Points",
        default,
        deserialize_with = "lenient_optional_count"
    )]
    pub points: Option<u32>,
}

fn parse_count(s: &str) -> Option<u32> {
    let n = s.trim().parse::<f64>().ok()?;
    if n.is_finite() && n >= 0.0 {
        Some(n as u32)
    } else {
        None
    }
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_count(&s).unwrap_or(0))
}

fn lenient_optional_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_count(&s))
}
