use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use url::Url;

use league_stats::display;
use league_stats::export;
use league_stats::xlsx;
use league_stats::{
    all_partnerships, analysis_rows_for, build_league_table, distinct_players, player_summary,
    GameIndex, GameRecord, Loader, LoaderConfig, PlayerAggregate, Row, Source, StatsError,
};

#[derive(Parser)]
#[command(name = "league-stats")]
#[command(about = "League table and partnership statistics from a game log CSV", long_about = None)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Game log CSV (file path or http(s) URL)
    #[arg(long, global = true, env = "LEAGUE_GAME_LOG")]
    game_log: Option<String>,

    /// Precomputed league table CSV (file path or http(s) URL)
    #[arg(long, global = true, env = "LEAGUE_STANDINGS")]
    standings: Option<String>,

    /// JSON bundle with "GameLog" / "League Table" / "Player Analysis" entries
    #[arg(long, global = true)]
    bundle: Option<String>,

    /// Base URL publishing GameLog.csv and LeagueTable.csv
    #[arg(long, global = true, env = "LEAGUE_BASE_URL")]
    base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Retries after network or server errors
    #[arg(long, global = true, default_value_t = 2)]
    retries: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the ranked league table
    Table {
        /// Use the precomputed league table instead of aggregating the game log
        #[arg(long)]
        precomputed: bool,

        /// Print JSON instead of a text table
        #[arg(long)]
        json: bool,
    },

    /// List players in the game log
    Players,

    /// Show one player's summary and partnerships
    Player {
        /// Player name, exactly as in the game log
        name: String,

        /// Show the bundle's precomputed "Player Analysis" rows instead
        #[arg(long)]
        precomputed: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write the league table and all partnerships to .xlsx or .csv
    Export {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Everything loaded for one run
struct Dataset {
    games: Vec<GameRecord>,
    standings: Option<Vec<PlayerAggregate>>,
    /// Precomputed per-player rows, only present in a bundle
    player_analysis: Vec<Row>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let data = load(&cli.input)?;

    match cli.command {
        Commands::Table { precomputed, json } => table(&data, precomputed, json)?,
        Commands::Players => players(&data),
        Commands::Player {
            name,
            precomputed,
            json,
        } => {
            if precomputed {
                player_analysis(&data, &name, json)?
            } else {
                player(&data, &name, json)?
            }
        }
        Commands::Export { output } => export_all(&data, &output)?,
    }

    Ok(())
}

fn load(input: &InputArgs) -> Result<Dataset> {
    let config = LoaderConfig::default()
        .with_timeout(input.timeout)
        .with_retries(input.retries);
    let loader = Loader::with_config(config).context("Failed to create HTTP client")?;

    let mut data = if let Some(bundle) = &input.bundle {
        let source = Source::parse(bundle)?;
        log::info!("Reading bundle: {}", source);
        let bundle = loader.load_bundle(&source).context("Failed to read data bundle")?;
        let standings = bundle.standings();
        Dataset {
            games: bundle.games(),
            standings: (!standings.is_empty()).then_some(standings),
            player_analysis: bundle.player_analysis(),
        }
    } else if let Some(base) = &input.base_url {
        let base = Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?;
        log::info!("Fetching league files from: {}", base);
        let site = loader.load_site(&base).context("Failed to load game log")?;
        Dataset {
            games: site.games,
            standings: site.standings,
            player_analysis: Vec::new(),
        }
    } else if let Some(game_log) = &input.game_log {
        let source = Source::parse(game_log)?;
        log::info!("Reading game log: {}", source);
        Dataset {
            games: loader.load_game_log(&source).context("Failed to load game log")?,
            standings: None,
            player_analysis: Vec::new(),
        }
    } else {
        anyhow::bail!("No input given: use --game-log, --bundle or --base-url");
    };

    if let Some(standings) = &input.standings {
        let source = Source::parse(standings)?;
        log::info!("Reading league table: {}", source);
        let standings = loader
            .load_standings(&source)
            .context("Failed to load league table")?;
        data.standings = Some(standings);
    }

    log::info!("Loaded {} game records", data.games.len());
    Ok(data)
}

fn table(data: &Dataset, precomputed: bool, json: bool) -> Result<()> {
    let table = match (&data.standings, precomputed) {
        (Some(standings), true) => standings.clone(),
        (None, true) => anyhow::bail!("No precomputed league table loaded"),
        (_, false) => build_league_table(&data.games),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    print!("{}", display::render_league_table(&table));
    println!();
    println!("Last updated: {}", display::format_last_updated(&chrono::Local::now()));
    Ok(())
}

fn players(data: &Dataset) {
    let names = distinct_players(&data.games);
    if names.is_empty() {
        println!("No data available");
    }
    for name in names {
        println!("{}", name);
    }
}

fn player(data: &Dataset, name: &str, json: bool) -> Result<()> {
    let all = distinct_players(&data.games);
    if !all.iter().any(|p| p == name) {
        return Err(StatsError::UnknownPlayer(name.to_string()).into());
    }

    let summary = player_summary(&data.games, name);
    let partnerships = GameIndex::new(&data.games).analyze(name, &all);

    if json {
        let value = serde_json::json!({
            "summary": summary,
            "partnerships": partnerships,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", display::render_summary(&summary));
    println!();
    print!("{}", display::render_partnerships(&partnerships));
    Ok(())
}

fn player_analysis(data: &Dataset, name: &str, json: bool) -> Result<()> {
    if data.player_analysis.is_empty() {
        anyhow::bail!("No precomputed player analysis loaded");
    }

    let rows = analysis_rows_for(&data.player_analysis, name);
    if rows.is_empty() {
        return Err(StatsError::UnknownPlayer(name.to_string()).into());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print!("{}", display::render_rows(&rows));
    Ok(())
}

fn export_all(data: &Dataset, output: &Path) -> Result<()> {
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let table = build_league_table(&data.games);

    match ext.as_str() {
        "xlsx" => {
            let all = all_partnerships(&data.games, &distinct_players(&data.games));
            println!("Writing Excel file: {}", output.display());
            xlsx::write_league_workbook(&table, Some(&all), output)
                .context("Failed to write Excel file")?;
        }
        "csv" => {
            println!("Writing CSV file: {}", output.display());
            export::write_league_csv_file(&table, output).context("Failed to write CSV file")?;

            let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("league");
            let partners_path = output.with_file_name(format!("{}-partnerships.csv", stem));
            let all = all_partnerships(&data.games, &distinct_players(&data.games));
            println!("Writing CSV file: {}", partners_path.display());
            let file = std::fs::File::create(&partners_path)
                .with_context(|| format!("Failed to create {}", partners_path.display()))?;
            export::write_partnerships_csv(&all, file).context("Failed to write CSV file")?;
        }
        _ => {
            anyhow::bail!("Unsupported output format: {}", ext);
        }
    }

    println!("Done!");
    Ok(())
}
