pub mod reader;

pub use reader::{parse, FieldValue, Row};
