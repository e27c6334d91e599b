pub mod display;
pub mod error;
pub mod export;
pub mod league;
pub mod loader;
pub mod model;
pub mod parser;
pub mod partnership;
pub mod xlsx;

pub use error::{Result, StatsError};
pub use league::{
    analysis_rows_for, build_league_table, build_league_table_for, distinct_players, load_game_log,
    load_standings, player_summary, PlayerSummary,
};
pub use loader::{DataBundle, Loader, LoaderConfig, SiteData, Source};
pub use model::*;
pub use parser::{FieldValue, Row};
pub use partnership::{all_partnerships, analyze_partnerships, GameIndex};
