//! Game log loading and league table aggregation

use crate::model::game::PLAYER_COLUMNS;
use crate::model::{whole_percent, GameRecord, PlayerAggregate, StandingRow};
use crate::parser::{self, Row};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Parse raw game log text into game records.
///
/// Rows that cannot be turned into a record are dropped with a warning.
pub fn load_game_log(text: &str) -> Vec<GameRecord> {
    let rows = parser::parse(text);
    let mut games = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        match GameRecord::from_row(row) {
            Some(game) => games.push(game),
            None => log::warn!(
                "Game log row {}: missing player or unknown result, skipped",
                idx + 2
            ),
        }
    }

    log::debug!("Loaded {} game records from {} rows", games.len(), rows.len());
    games
}

/// Parse a precomputed `LeagueTable` CSV into ranked rows.
///
/// Unreadable rows are skipped; empty or malformed text gives an empty table.
pub fn load_standings(text: &str) -> Vec<PlayerAggregate> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut table = Vec::new();
    for (idx, result) in reader.deserialize::<StandingRow>().enumerate() {
        match result {
            Ok(row) if !row.player.trim().is_empty() => {
                table.push(PlayerAggregate::from_standing(&row));
            }
            Ok(_) => {}
            Err(e) => log::warn!("League table row {}: {}", idx + 2, e),
        }
    }

    rank(&mut table);
    table
}

/// Distinct player names in ascending order
pub fn distinct_players(games: &[GameRecord]) -> Vec<String> {
    games
        .iter()
        .map(|g| g.player.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Build the ranked league table for every player in the game log
pub fn build_league_table(games: &[GameRecord]) -> Vec<PlayerAggregate> {
    let players = distinct_players(games);
    build_league_table_for(games, &players)
}

/// Build the ranked league table for an explicit roster.
///
/// Roster players without games get an all-zero row; games by players
/// outside the roster are ignored.
pub fn build_league_table_for(games: &[GameRecord], roster: &[String]) -> Vec<PlayerAggregate> {
    let mut by_player: BTreeMap<&str, PlayerAggregate> = roster
        .iter()
        .map(|p| (p.as_str(), PlayerAggregate::new(p)))
        .collect();

    let mut ignored = 0usize;
    for game in games {
        match by_player.get_mut(game.player.as_str()) {
            Some(agg) => agg.record(game),
            None => ignored += 1,
        }
    }
    if ignored > 0 {
        log::debug!("Ignored {} records for players outside the roster", ignored);
    }

    let mut table: Vec<PlayerAggregate> = by_player.into_values().collect();
    for agg in &mut table {
        agg.finalize();
    }

    rank(&mut table);
    table
}

/// League ordering: points, points per game, win percent, goals and
/// assists descending, then name ascending
pub fn compare_standings(a: &PlayerAggregate, b: &PlayerAggregate) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| b.points_per_game.total_cmp(&a.points_per_game))
        .then_with(|| b.win_percent.total_cmp(&a.win_percent))
        .then_with(|| b.goals.cmp(&a.goals))
        .then_with(|| b.assists.cmp(&a.assists))
        .then_with(|| a.player.cmp(&b.player))
}

pub fn rank(table: &mut [PlayerAggregate]) {
    table.sort_by(compare_standings);
}

/// Headline numbers for a single player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub player: String,
    pub games: u32,
    pub wins: u32,
    /// Whole percent
    pub win_percent: u32,
    pub goals: u32,
    pub assists: u32,
}

pub fn player_summary(games: &[GameRecord], player: &str) -> PlayerSummary {
    let mut summary = PlayerSummary {
        player: player.to_string(),
        games: 0,
        wins: 0,
        win_percent: 0,
        goals: 0,
        assists: 0,
    };

    for game in games.iter().filter(|g| g.player == player) {
        summary.games += 1;
        if game.result.is_win() {
            summary.wins += 1;
        }
        summary.goals += game.goals;
        summary.assists += game.assists;
    }

    summary.win_percent = whole_percent(summary.wins, summary.games);
    summary
}

/// Rows of a precomputed analysis sheet that belong to `player`
pub fn analysis_rows_for<'a>(rows: &'a [Row], player: &str) -> Vec<&'a Row> {
    rows.iter()
        .filter(|row| row.get_str(&PLAYER_COLUMNS).map(str::trim) == Some(player))
        .collect()
}
