use crate::parser::Row;
use serde::Serialize;
use std::fmt;

pub const PLAYER_COLUMNS: [&str; 2] = ["Player", "Player Name"];
pub const GAME_ID_COLUMNS: [&str; 2] = ["ID", "Game ID"];
pub const TEAM_COLUMNS: [&str; 1] = ["Team"];
pub const RESULT_COLUMNS: [&str; 1] = ["Result"];
pub const GOALS_COLUMNS: [&str; 2] = ["Gls", "Goals"];
pub const OWN_GOALS_COLUMNS: [&str; 2] = ["OG", "Own Goals"];
pub const ASSISTS_COLUMNS: [&str; 2] = ["Ast", "Assists"];
pub const PENALTIES_COLUMNS: [&str; 2] = ["Pen", "Penalties"];

/// Outcome of a game from one player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameResult {
    Win,
    Draw,
    Loss,
}

impl GameResult {
    /// Parse the exact `Win` / `Draw` / `Loss` spelling used in the game log
    pub fn from_str(s: &str) -> Option<GameResult> {
        match s.trim() {
            "Win" => Some(GameResult::Win),
            "Draw" => Some(GameResult::Draw),
            "Loss" => Some(GameResult::Loss),
            _ => None,
        }
    }

    /// League points awarded for this result
    pub fn points(&self) -> u32 {
        match self {
            GameResult::Win => 3,
            GameResult::Draw => 1,
            GameResult::Loss => 0,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, GameResult::Win)
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameResult::Win => "Win",
            GameResult::Draw => "Draw",
            GameResult::Loss => "Loss",
        };
        write!(f, "{}", s)
    }
}

/// One player's appearance in one game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub game_id: String,
    pub player: String,
    pub team: String,
    pub result: GameResult,
    pub goals: u32,
    pub own_goals: u32,
    pub assists: u32,
    pub penalties: u32,
}

impl GameRecord {
    pub fn new(game_id: &str, player: &str, team: &str, result: GameResult) -> Self {
        Self {
            game_id: game_id.to_string(),
            player: player.to_string(),
            team: team.to_string(),
            result,
            goals: 0,
            own_goals: 0,
            assists: 0,
            penalties: 0,
        }
    }

    pub fn with_goals(mut self, goals: u32) -> Self {
        self.goals = goals;
        self
    }

    pub fn with_own_goals(mut self, own_goals: u32) -> Self {
        self.own_goals = own_goals;
        self
    }

    pub fn with_assists(mut self, assists: u32) -> Self {
        self.assists = assists;
        self
    }

    pub fn with_penalties(mut self, penalties: u32) -> Self {
        self.penalties = penalties;
        self
    }

    /// The player's side in a game, as (game id, team)
    pub fn side(&self) -> (&str, &str) {
        (self.game_id.as_str(), self.team.as_str())
    }

    /// Build a record from a parsed row.
    ///
    /// Returns `None` when the row has no player or an unrecognised result.
    pub fn from_row(row: &Row) -> Option<GameRecord> {
        let player = row.get_str(&PLAYER_COLUMNS).unwrap_or("");
        if player.is_empty() {
            return None;
        }

        let result = GameResult::from_str(row.get_str(&RESULT_COLUMNS).unwrap_or(""))?;

        Some(GameRecord {
            game_id: row.get_str(&GAME_ID_COLUMNS).unwrap_or("").to_string(),
            player: player.to_string(),
            team: row.get_str(&TEAM_COLUMNS).unwrap_or("").to_string(),
            result,
            goals: count(row, &GOALS_COLUMNS),
            own_goals: count(row, &OWN_GOALS_COLUMNS),
            assists: count(row, &ASSISTS_COLUMNS),
            penalties: count(row, &PENALTIES_COLUMNS),
        })
    }
}

/// Non-negative whole count from a numeric column, 0 when missing
fn count(row: &Row, names: &[&str]) -> u32 {
    match row.get_number(names) {
        Some(n) if n.is_finite() && n > 0.0 => n as u32,
        _ => 0,
    }
}
