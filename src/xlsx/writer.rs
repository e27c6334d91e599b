use crate::error::Result;
use crate::export::{LEAGUE_HEADERS, PARTNERSHIP_HEADERS};
use crate::model::{PartnershipRecord, PlayerAggregate};
use rust_xlsxwriter::{
    ConditionalFormat3ColorScale, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use std::path::Path;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

/// Red (low) -> Yellow (mid) -> Green (high)
fn win_rate_scale() -> ConditionalFormat3ColorScale {
    ConditionalFormat3ColorScale::new()
        .set_minimum_color("F8696B")
        .set_midpoint_color("FFEB84")
        .set_maximum_color("63BE7B")
}

/// Write the league table, and optionally every player's partnerships, to
/// an Excel workbook
pub fn write_league_workbook(
    table: &[PlayerAggregate],
    partnerships: Option<&[(String, Vec<PartnershipRecord>)]>,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_league_sheet(sheet, table)?;

    if let Some(all) = partnerships {
        let sheet = workbook.add_worksheet();
        write_partnerships_sheet(sheet, all)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_league_sheet(sheet: &mut Worksheet, table: &[PlayerAggregate]) -> Result<()> {
    sheet.set_name("League Table")?;

    sheet.set_column_width(0, 24)?; // Player
    for col in 1..LEAGUE_HEADERS.len() as u16 {
        sheet.set_column_width(col, 8)?;
    }

    let header_format = header_format();
    for (col, header) in LEAGUE_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let left_format = Format::new().set_align(FormatAlign::Left);
    let rate_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.0");

    for (idx, agg) in table.iter().enumerate() {
        let row = (idx + 1) as u32;

        sheet.write_string_with_format(row, 0, &agg.player, &left_format)?;

        let counts = [
            agg.games,
            agg.wins,
            agg.draws,
            agg.losses,
            agg.goals,
            agg.own_goals,
            agg.assists,
            agg.penalties,
            agg.total_points,
        ];
        for (offset, value) in counts.iter().enumerate() {
            sheet.write_number_with_format(row, 1 + offset as u16, *value as f64, &center_format)?;
        }

        sheet.write_number_with_format(row, 10, agg.points_per_game, &rate_format)?;
        sheet.write_number_with_format(row, 11, agg.win_percent, &rate_format)?;
        sheet.write_number_with_format(row, 12, row as f64, &center_format)?;
    }

    if !table.is_empty() {
        let last_row = table.len() as u32;
        sheet.add_conditional_format(1, 11, last_row, 11, &win_rate_scale())?;
    }

    Ok(())
}

fn write_partnerships_sheet(
    sheet: &mut Worksheet,
    all: &[(String, Vec<PartnershipRecord>)],
) -> Result<()> {
    sheet.set_name("Partnerships")?;

    sheet.set_column_width(0, 24)?; // Player
    sheet.set_column_width(1, 24)?; // Partner
    for col in 2..PARTNERSHIP_HEADERS.len() as u16 {
        sheet.set_column_width(col, 14)?;
    }

    let header_format = header_format();
    for (col, header) in PARTNERSHIP_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let left_format = Format::new().set_align(FormatAlign::Left);

    let mut row = 0u32;
    for (player, records) in all {
        for rec in records {
            row += 1;
            sheet.write_string_with_format(row, 0, player, &left_format)?;
            sheet.write_string_with_format(row, 1, &rec.other_player, &left_format)?;
            sheet.write_number_with_format(row, 2, rec.games_in_common as f64, &center_format)?;
            sheet.write_number_with_format(row, 3, rec.same_team_games as f64, &center_format)?;
            sheet.write_number_with_format(row, 4, rec.opposite_team_games as f64, &center_format)?;
            sheet.write_number_with_format(row, 5, rec.wins_together as f64, &center_format)?;

            // Percentages without any underlying games stay blank
            if rec.same_team_games > 0 {
                let percent = rec.same_team_win_percent as f64;
                sheet.write_number_with_format(row, 6, percent, &center_format)?;
            }
            sheet.write_number_with_format(row, 7, rec.head_to_head_wins as f64, &center_format)?;
            if rec.opposite_team_games > 0 {
                let percent = rec.head_to_head_win_percent as f64;
                sheet.write_number_with_format(row, 8, percent, &center_format)?;
            }
        }
    }

    if row > 0 {
        let scale = win_rate_scale();
        sheet.add_conditional_format(1, 6, row, 6, &scale)?;
        sheet.add_conditional_format(1, 8, row, 8, &scale)?;
    }

    Ok(())
}
