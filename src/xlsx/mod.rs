pub mod writer;

pub use writer::write_league_workbook;
