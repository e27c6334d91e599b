//! End-to-end test over a small three-game season
//!
//! The fixture has quoted names with commas, a blank line, a trailing row of
//! empty fields, blank numeric cells and one same-team result mismatch
//! (game 3: "Smith, J." recorded a Loss, Cal a Win on the same side).

use league_stats::{
    analysis_rows_for, analyze_partnerships, build_league_table, build_league_table_for,
    display, distinct_players, load_game_log, DataBundle, GameIndex, Loader, PartnershipRecord,
    Source,
};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("GameLog.csv")
}

fn fixture() -> String {
    std::fs::read_to_string(fixture_path()).unwrap()
}

fn find<'a>(records: &'a [PartnershipRecord], name: &str) -> &'a PartnershipRecord {
    records
        .iter()
        .find(|r| r.other_player == name)
        .unwrap_or_else(|| panic!("no partnership with {}", name))
}

#[test]
fn test_load_fixture() {
    let games = load_game_log(&fixture());
    assert_eq!(games.len(), 12);
    assert_eq!(
        distinct_players(&games),
        vec!["Ana", "Ben", "Cal", "Smith, J."]
    );
}

#[test]
fn test_loader_reads_fixture() {
    let loader = Loader::new().unwrap();
    let games = loader
        .load_game_log(&Source::File(fixture_path()))
        .unwrap();
    assert_eq!(games, load_game_log(&fixture()));
}

#[test]
fn test_league_table() {
    let games = load_game_log(&fixture());
    let table = build_league_table(&games);

    let names: Vec<&str> = table.iter().map(|a| a.player.as_str()).collect();
    // Smith, Cal and Ben tie on points and rates; goals then assists split them
    assert_eq!(names, vec!["Ana", "Smith, J.", "Cal", "Ben"]);

    let ana = &table[0];
    assert_eq!((ana.games, ana.wins, ana.draws, ana.losses), (3, 2, 1, 0));
    assert_eq!(ana.goals, 4);
    assert_eq!(ana.penalties, 1);
    assert_eq!(ana.total_points, 7);
    assert_eq!(ana.points_per_game, 2.3);
    assert_eq!(ana.win_percent, 66.7);

    let smith = &table[1];
    assert_eq!(smith.games, 3);
    assert_eq!(smith.goals, 2);
    assert_eq!(smith.total_points, 4);
    assert_eq!(smith.points_per_game, 1.3);
    assert_eq!(smith.win_percent, 33.3);

    let ben = &table[3];
    assert_eq!(ben.own_goals, 1);
    assert_eq!(ben.assists, 1);

    for agg in &table {
        assert_eq!(agg.games, agg.wins + agg.draws + agg.losses);
    }
}

#[test]
fn test_partnerships_for_smith() {
    let games = load_game_log(&fixture());
    let all = distinct_players(&games);
    let records = analyze_partnerships(&games, "Smith, J.", &all);

    let names: Vec<&str> = records.iter().map(|r| r.other_player.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Ben", "Cal"]);

    let ana = find(&records, "Ana");
    assert_eq!((ana.same_team_games, ana.opposite_team_games), (1, 2));
    assert_eq!(ana.same_team_win_percent, 100);
    assert_eq!(ana.head_to_head_win_percent, 0);

    let ben = find(&records, "Ben");
    assert_eq!((ben.same_team_games, ben.opposite_team_games), (1, 2));
    assert_eq!(ben.wins_together, 0);
    assert_eq!(ben.head_to_head_win_percent, 50);

    let cal = find(&records, "Cal");
    assert_eq!(cal.games_in_common, 3);
    assert_eq!(cal.wins_together, 0);
}

#[test]
fn test_mismatched_results_counted_per_record() {
    let games = load_game_log(&fixture());
    let all = distinct_players(&games);

    let smith_to_cal = analyze_partnerships(&games, "Smith, J.", &all);
    let cal_to_smith = analyze_partnerships(&games, "Cal", &all);

    let a = find(&smith_to_cal, "Cal");
    let b = find(&cal_to_smith, "Smith, J.");
    assert_eq!(a.same_team_games, b.same_team_games);
    assert_eq!(a.opposite_team_games, b.opposite_team_games);
    assert_eq!(a.wins_together, 0);
    assert_eq!(b.wins_together, 1);
    assert_eq!(b.same_team_win_percent, 100);
}

#[test]
fn test_index_agrees_with_scan() {
    let games = load_game_log(&fixture());
    let all = distinct_players(&games);
    let index = GameIndex::new(&games);

    for player in &all {
        let records = index.analyze(player, &all);
        assert!(records.iter().all(|r| &r.other_player != player));
        assert_eq!(records, analyze_partnerships(&games, player, &all));
    }
}

#[test]
fn test_roster_player_without_games() {
    let games = load_game_log(&fixture());
    let mut roster = distinct_players(&games);
    roster.push("Dee".to_string());

    let table = build_league_table_for(&games, &roster);
    let dee = table.iter().find(|a| a.player == "Dee").unwrap();
    assert_eq!(dee.games, 0);
    assert_eq!(dee.points_per_game, 0.0);
    assert_eq!(dee.win_percent, 0.0);
    assert_eq!(table.last().unwrap().player, "Dee");
}

#[test]
fn test_empty_inputs() {
    for text in ["", "HeaderOnly", "Game ID,Player Name,Team,Result\n\n"] {
        let games = load_game_log(text);
        assert!(games.is_empty());
        assert!(build_league_table(&games).is_empty());
        assert!(analyze_partnerships(&games, "Ana", &[]).is_empty());
    }
}

#[test]
fn test_bundle_with_published_sheets() {
    let bundle = DataBundle {
        game_log: fixture(),
        league_table: concat!(
            "Player,Appearances,Wins,Draws,Losses,Goals,Assists,Win Rate %,Points Per Game\n",
            "Ana,3,2,1,0,4,0,66.7,2.3\n",
        )
        .to_string(),
        player_analysis: "Player Name,Partner,Games Together,Win Rate %\n\
                          Ana,Cal,2,50\n\
                          \"Smith, J.\",Ana,1,100\n"
            .to_string(),
    };

    let standings = bundle.standings();
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].total_points, 7);
    assert_eq!(standings[0].games, 3);

    let analysis = bundle.player_analysis();
    let smith = analysis_rows_for(&analysis, "Smith, J.");
    assert_eq!(smith.len(), 1);

    let text = display::render_rows(&smith);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Player Name"));
    assert!(lines[1].starts_with("Smith, J."));
    assert!(lines[1].ends_with("100"));
}
