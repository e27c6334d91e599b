use serde::Serialize;

/// Same-team win percentage at or above which a partnership is strong
pub const STRONG_THRESHOLD: u32 = 60;
/// Same-team win percentage at or below which a partnership is weak
pub const WEAK_THRESHOLD: u32 = 40;

/// Statistics between a selected player and one other player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnershipRecord {
    pub other_player: String,
    pub games_in_common: u32,
    pub same_team_games: u32,
    pub opposite_team_games: u32,
    /// Wins while on the same team, by the selected player's own result
    pub wins_together: u32,
    /// Selected player's wins against the other player
    pub head_to_head_wins: u32,
    /// Whole percent, 0 when there are no same-team games
    pub same_team_win_percent: u32,
    /// Whole percent, 0 when there are no opposite-team games
    pub head_to_head_win_percent: u32,
}

/// Rough quality of a partnership, used for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Band {
    Strong,
    Neutral,
    Weak,
}

/// `round(100 * part / whole)`, or 0 for an empty whole
pub fn whole_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round() as u32
}

impl PartnershipRecord {
    /// Build a record from raw counts, filling in the derived fields
    pub fn from_counts(
        other_player: &str,
        same_team_games: u32,
        wins_together: u32,
        opposite_team_games: u32,
        head_to_head_wins: u32,
    ) -> Self {
        Self {
            other_player: other_player.to_string(),
            games_in_common: same_team_games + opposite_team_games,
            same_team_games,
            opposite_team_games,
            wins_together,
            head_to_head_wins,
            same_team_win_percent: whole_percent(wins_together, same_team_games),
            head_to_head_win_percent: whole_percent(head_to_head_wins, opposite_team_games),
        }
    }

    /// Highlight band from the same-team win rate
    pub fn band(&self) -> Band {
        if self.same_team_games == 0 {
            Band::Neutral
        } else if self.same_team_win_percent >= STRONG_THRESHOLD {
            Band::Strong
        } else if self.same_team_win_percent <= WEAK_THRESHOLD {
            Band::Weak
        } else {
            Band::Neutral
        }
    }
}
