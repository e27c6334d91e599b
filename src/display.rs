//! Plain-text rendering of league data

use crate::league::PlayerSummary;
use crate::model::{Band, PartnershipRecord, PlayerAggregate};
use crate::parser::Row;
use chrono::{DateTime, TimeZone};
use std::fmt::{self, Write};

/// en-GB style timestamp: `16/10/2026, 14:05`
pub fn format_last_updated<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    dt.format("%d/%m/%Y, %H:%M").to_string()
}

/// `"NN%"`, or `"-"` when there was nothing to take a percentage of
pub fn percent_label(value: u32, denominator: u32) -> String {
    if denominator == 0 {
        "-".to_string()
    } else {
        format!("{}%", value)
    }
}

fn band_marker(band: Band) -> &'static str {
    match band {
        Band::Strong => "+",
        Band::Weak => "-",
        Band::Neutral => "",
    }
}

/// Width of the name column: the longest name, at least as wide as the header
fn name_width<'a>(names: impl Iterator<Item = &'a str>, header: &str) -> usize {
    names.map(|n| n.chars().count()).chain([header.len()]).max().unwrap_or(0)
}

pub fn render_league_table(table: &[PlayerAggregate]) -> String {
    if table.is_empty() {
        return "No data available\n".to_string();
    }

    let width = name_width(table.iter().map(|a| a.player.as_str()), "Player");
    let mut out = String::new();
    let _ = writeln!(
        out,
        concat!(
            "{:>3}  {:<width$}  {:>3} {:>3} {:>3} {:>3} ",
            "{:>4} {:>3} {:>3} {:>3} {:>4} {:>5} {:>6}"
        ),
        "#", "Player", "P", "W", "D", "L", "Gls", "OG", "Ast", "Pen", "Pts", "PPG", "Win %",
        width = width
    );

    for (pos, agg) in table.iter().enumerate() {
        let _ = writeln!(
            out,
            concat!(
                "{:>3}  {:<width$}  {:>3} {:>3} {:>3} {:>3} ",
                "{:>4} {:>3} {:>3} {:>3} {:>4} {:>5.1} {:>6.1}"
            ),
            pos + 1,
            agg.player,
            agg.games,
            agg.wins,
            agg.draws,
            agg.losses,
            agg.goals,
            agg.own_goals,
            agg.assists,
            agg.penalties,
            agg.total_points,
            agg.points_per_game,
            agg.win_percent,
            width = width
        );
    }

    out
}

pub fn render_summary(summary: &PlayerSummary) -> String {
    format!(
        "{}\n  Games: {}  Win %: {}  Goals: {}  Assists: {}\n",
        summary.player,
        summary.games,
        percent_label(summary.win_percent, summary.games),
        summary.goals,
        summary.assists
    )
}

pub fn render_partnerships(records: &[PartnershipRecord]) -> String {
    if records.is_empty() {
        return "No shared games\n".to_string();
    }

    let width = name_width(records.iter().map(|r| r.other_player.as_str()), "Player");
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>5} {:>5} {:>5} {:>9} {:>6}",
        "Player", "Games", "Same", "Opp", "Together", "H2H",
        width = width
    );

    for rec in records {
        let together = format!(
            "{}{}",
            percent_label(rec.same_team_win_percent, rec.same_team_games),
            band_marker(rec.band())
        );
        let _ = writeln!(
            out,
            "{:<width$}  {:>5} {:>5} {:>5} {:>9} {:>6}",
            rec.other_player,
            rec.games_in_common,
            rec.same_team_games,
            rec.opposite_team_games,
            together,
            percent_label(rec.head_to_head_win_percent, rec.opposite_team_games),
            width = width
        );
    }

    out
}

fn write_padded<'a>(out: &mut String, values: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = values
        .zip(widths)
        .map(|(v, &w)| format!("{:<w$}", v, w = w))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Left-aligned table of arbitrary rows. Columns follow the order in which
/// headers first appear; a row without a column leaves it blank.
pub fn render_rows(rows: &[&Row]) -> String {
    if rows.is_empty() {
        return "No data available\n".to_string();
    }

    let mut headers: Vec<&str> = Vec::new();
    for row in rows {
        for (name, _) in row.iter() {
            if !headers.contains(&name) {
                headers.push(name);
            }
        }
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| row.get(h).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| name_width(cells.iter().map(|c| c[i].as_str()), h))
        .collect();

    let mut out = String::new();
    write_padded(&mut out, headers.iter().copied(), &widths);
    for row in &cells {
        write_padded(&mut out, row.iter().map(String::as_str), &widths);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_last_updated() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_last_updated(&dt), "07/03/2026, 09:05");

        let offset = FixedOffset::east_opt(3600).unwrap();
        let dt = offset.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(format_last_updated(&dt), "31/12/2025, 23:59");
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(0, 0), "-");
        assert_eq!(percent_label(0, 3), "0%");
        assert_eq!(percent_label(67, 3), "67%");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_league_table(&[]), "No data available\n");
        assert_eq!(render_partnerships(&[]), "No shared games\n");
    }

    #[test]
    fn test_render_league_table() {
        let mut agg = PlayerAggregate::new("Ann");
        agg.games = 3;
        agg.wins = 1;
        agg.draws = 1;
        agg.losses = 1;
        agg.finalize();

        let text = render_league_table(&[agg]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Pts"));
        assert!(lines[1].contains("Ann"));
        assert!(lines[1].ends_with("1.3   33.3"));
    }

    #[test]
    fn test_render_rows() {
        let rows = crate::parser::parse(
            "Player,Partner,Games\nAnn,Bob,4\nAnn,\"Smith, J.\",2\nAnn,Cy\n",
        );
        let refs: Vec<&Row> = rows.iter().collect();
        let text = render_rows(&refs);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Player  Partner    Games");
        assert_eq!(lines[1], "Ann     Bob        4");
        assert_eq!(lines[2], "Ann     Smith, J.  2");
        assert_eq!(lines[3], "Ann     Cy");
        assert_eq!(render_rows(&[]), "No data available\n");
    }

    #[test]
    fn test_render_partnerships_marks_bands() {
        let records = vec![
            PartnershipRecord::from_counts("Bob", 4, 3, 0, 0),
            PartnershipRecord::from_counts("Cy", 0, 0, 2, 1),
        ];
        let text = render_partnerships(&records);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].contains("75%+"));
        // Cy never played alongside, so the together column is absent
        assert!(lines[2].contains(" -"));
        assert!(lines[2].ends_with("50%"));
    }
}
