//! Partnership and head-to-head statistics between players
//!
//! Every count uses each record's own `Result`: a same-team game where the
//! two players recorded different outcomes is counted from the selected
//! player's side without reconciling the two.

use crate::model::{GameRecord, PartnershipRecord};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Order by games in common, then same-team win percent, both descending.
/// Stable, so equal entries keep their input order.
pub fn sort_partnerships(records: &mut [PartnershipRecord]) {
    records.sort_by(|a, b| {
        b.games_in_common
            .cmp(&a.games_in_common)
            .then_with(|| b.same_team_win_percent.cmp(&a.same_team_win_percent))
    });
}

/// (game id, team) to record for one player's games. A repeated side keeps
/// the later record.
fn side_map<'a>(games: &[&'a GameRecord]) -> HashMap<(&'a str, &'a str), &'a GameRecord> {
    games.iter().map(|&g| (g.side(), g)).collect()
}

/// Partnerships of `selected` with every other player in `all_players`.
///
/// Direct pairwise scan over the whole log; [`GameIndex::analyze`] gives the
/// same answer from a prebuilt index.
pub fn analyze_partnerships(
    games: &[GameRecord],
    selected: &str,
    all_players: &[String],
) -> Vec<PartnershipRecord> {
    let selected_games: Vec<&GameRecord> = games.iter().filter(|g| g.player == selected).collect();
    let selected_sides = side_map(&selected_games);

    let mut records = Vec::new();

    for other in all_players.iter().filter(|p| p.as_str() != selected) {
        let other_games: Vec<&GameRecord> = games.iter().filter(|g| &g.player == other).collect();
        let other_sides: HashSet<(&str, &str)> = other_games.iter().map(|g| g.side()).collect();

        let mut same_team = 0;
        let mut wins_together = 0;
        for (key, game) in &selected_sides {
            if other_sides.contains(key) {
                same_team += 1;
                if game.result.is_win() {
                    wins_together += 1;
                }
            }
        }

        let mut opposite_team = 0;
        let mut head_to_head_wins = 0;
        for mine in &selected_games {
            for theirs in &other_games {
                if mine.game_id == theirs.game_id && mine.team != theirs.team {
                    opposite_team += 1;
                    if mine.result.is_win() {
                        head_to_head_wins += 1;
                    }
                }
            }
        }

        if same_team + opposite_team > 0 {
            records.push(PartnershipRecord::from_counts(
                other,
                same_team,
                wins_together,
                opposite_team,
                head_to_head_wins,
            ));
        }
    }

    sort_partnerships(&mut records);
    records
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    same_team: u32,
    wins_together: u32,
    opposite_team: u32,
    head_to_head_wins: u32,
}

/// Game records indexed by game id and by player, built once per log
#[derive(Debug)]
pub struct GameIndex<'a> {
    by_game: HashMap<&'a str, Vec<&'a GameRecord>>,
    by_player: HashMap<&'a str, Vec<&'a GameRecord>>,
}

impl<'a> GameIndex<'a> {
    pub fn new(games: &'a [GameRecord]) -> Self {
        let mut by_game: HashMap<&str, Vec<&GameRecord>> = HashMap::new();
        let mut by_player: HashMap<&str, Vec<&GameRecord>> = HashMap::new();

        for game in games {
            by_game.entry(game.game_id.as_str()).or_default().push(game);
            by_player.entry(game.player.as_str()).or_default().push(game);
        }

        Self { by_game, by_player }
    }

    pub fn game_count(&self) -> usize {
        self.by_game.len()
    }

    /// Same result as [`analyze_partnerships`], visiting only the games the
    /// selected player took part in
    pub fn analyze(&self, selected: &str, all_players: &[String]) -> Vec<PartnershipRecord> {
        let selected_games: &[&GameRecord] = self
            .by_player
            .get(selected)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);

        let mut tallies: HashMap<&str, Tally> = HashMap::new();

        // Same team: each side key counts once per other player
        for game in side_map(selected_games).values() {
            let teammates: BTreeSet<&str> = self.by_game[game.game_id.as_str()]
                .iter()
                .filter(|r| r.team == game.team && r.player != selected)
                .map(|r| r.player.as_str())
                .collect();

            for teammate in teammates {
                let tally = tallies.entry(teammate).or_default();
                tally.same_team += 1;
                if game.result.is_win() {
                    tally.wins_together += 1;
                }
            }
        }

        // Opposite team: every pairing of records across the two sides
        let game_ids: BTreeSet<&str> = selected_games.iter().map(|g| g.game_id.as_str()).collect();
        for game_id in game_ids {
            let participants = &self.by_game[game_id];
            for mine in selected_games.iter().filter(|g| g.game_id == game_id) {
                for theirs in participants.iter().filter(|r| r.player != selected) {
                    if theirs.team != mine.team {
                        let tally = tallies.entry(theirs.player.as_str()).or_default();
                        tally.opposite_team += 1;
                        if mine.result.is_win() {
                            tally.head_to_head_wins += 1;
                        }
                    }
                }
            }
        }

        let mut records: Vec<PartnershipRecord> = all_players
            .iter()
            .filter(|p| p.as_str() != selected)
            .filter_map(|other| {
                let tally = tallies.get(other.as_str())?;
                Some(PartnershipRecord::from_counts(
                    other,
                    tally.same_team,
                    tally.wins_together,
                    tally.opposite_team,
                    tally.head_to_head_wins,
                ))
            })
            .filter(|r| r.games_in_common > 0)
            .collect();

        sort_partnerships(&mut records);
        records
    }
}

/// Partnership lists for every player, computed in parallel
pub fn all_partnerships(
    games: &[GameRecord],
    players: &[String],
) -> Vec<(String, Vec<PartnershipRecord>)> {
    let index = GameIndex::new(games);
    log::debug!(
        "Analyzing partnerships for {} players over {} games",
        players.len(),
        index.game_count()
    );

    players
        .par_iter()
        .map(|player| (player.clone(), index.analyze(player, players)))
        .collect()
}
