//! CSV output of the league table and partnership lists

use crate::error::Result;
use crate::model::{PartnershipRecord, PlayerAggregate};
use std::io::Write;
use std::path::Path;

pub const LEAGUE_HEADERS: [&str; 13] = [
    "Player", "P", "W", "D", "L", "Gls", "OG", "Ast", "Pen", "Pts", "PPG", "Win %", "Rank",
];

pub const PARTNERSHIP_HEADERS: [&str; 9] = [
    "Player",
    "Partner",
    "Games Together",
    "Same Team",
    "Opposite Team",
    "Wins Together",
    "Win % Together",
    "H2H Wins",
    "H2H Win %",
];

pub fn write_league_csv<W: Write>(table: &[PlayerAggregate], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(LEAGUE_HEADERS)?;

    for (pos, agg) in table.iter().enumerate() {
        wtr.write_record([
            agg.player.clone(),
            agg.games.to_string(),
            agg.wins.to_string(),
            agg.draws.to_string(),
            agg.losses.to_string(),
            agg.goals.to_string(),
            agg.own_goals.to_string(),
            agg.assists.to_string(),
            agg.penalties.to_string(),
            agg.total_points.to_string(),
            format!("{:.1}", agg.points_per_game),
            format!("{:.1}", agg.win_percent),
            (pos + 1).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Absent percentages are written as empty cells
fn optional_percent(value: u32, denominator: u32) -> String {
    if denominator == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

pub fn write_partnerships_csv<W: Write>(
    all: &[(String, Vec<PartnershipRecord>)],
    writer: W,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(PARTNERSHIP_HEADERS)?;

    for (player, records) in all {
        for rec in records {
            wtr.write_record([
                player.clone(),
                rec.other_player.clone(),
                rec.games_in_common.to_string(),
                rec.same_team_games.to_string(),
                rec.opposite_team_games.to_string(),
                rec.wins_together.to_string(),
                optional_percent(rec.same_team_win_percent, rec.same_team_games),
                rec.head_to_head_wins.to_string(),
                optional_percent(rec.head_to_head_win_percent, rec.opposite_team_games),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_league_csv_file(table: &[PlayerAggregate], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_league_csv(table, file)
}
