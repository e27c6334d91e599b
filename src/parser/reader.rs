use lazy_static::lazy_static;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Columns whose values are coerced to numbers when they look numeric
pub const NUMERIC_COLUMNS: [&str; 8] = [
    "Gls", "Goals", "OG", "Own Goals", "Ast", "Assists", "Pen", "Penalties",
];

lazy_static! {
    static ref NUMERIC: Regex = Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)$").unwrap();
}

/// A single cell value after coercion
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Empty text and zero count as "no value" for the row guard
    fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n == 0.0 || n.is_nan(),
            FieldValue::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 => write!(f, "{:.0}", n),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// One data row: header name to value, in header order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, FieldValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing an earlier value under the same header
    pub fn insert(&mut self, name: &str, value: FieldValue) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Text value of the first listed column that is present
    pub fn get_str(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| match self.get(name) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Numeric value of the first listed column that is present
    pub fn get_number(&self, names: &[&str]) -> Option<f64> {
        names.iter().find_map(|name| match self.get(name) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Serializes as a map in header order
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn is_numeric_column(name: &str) -> bool {
    NUMERIC_COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(name))
}

/// Coerce a cleaned value for the given column
fn coerce(column: &str, value: &str) -> FieldValue {
    if is_numeric_column(column) && NUMERIC.is_match(value) {
        if let Ok(n) = value.parse::<f64>() {
            return FieldValue::Number(n);
        }
    }
    FieldValue::Text(value.to_string())
}

/// Parse delimited text into rows keyed by the header line.
///
/// Double-quoted fields may contain commas and `""` is a literal quote.
/// Never fails: fewer than two non-blank lines give an empty result, rows
/// whose first column is empty are skipped, missing trailing values are
/// omitted and surplus values are ignored.
pub fn parse(text: &str) -> Vec<Row> {
    let lines: Vec<&str> = text.split('\n').filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }
    let text = lines.join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(Ok(record)) => record.iter().map(String::from).collect(),
        Some(Err(e)) => {
            log::warn!("Unreadable header line: {}", e);
            return Vec::new();
        }
        None => return Vec::new(),
    };

    let mut rows = Vec::with_capacity(lines.len() - 1);
    let mut skipped = 0usize;

    for (idx, result) in records.enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Line {}: {}", idx + 2, e);
                continue;
            }
        };

        let mut row = Row::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            row.insert(header, coerce(header, value));
        }

        let keep = headers
            .first()
            .and_then(|first| row.get(first))
            .is_some_and(|v| !v.is_falsy());

        if keep {
            rows.push(row);
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} rows with an empty first column", skipped);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_field_with_comma() {
        let rows = parse("Name,Gls,Result\n\"Smith, J.\",3,Win");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str(&["Name"]), Some("Smith, J."));
        assert_eq!(rows[0].get("Gls"), Some(&FieldValue::Number(3.0)));
        assert_eq!(rows[0].get_str(&["Result"]), Some("Win"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("HeaderOnly").is_empty());
        assert!(parse("\n\n  \nHeaderOnly\n\n").is_empty());
    }

    #[test]
    fn test_escaped_quote() {
        let rows = parse("Player,Nickname,Team\nAnn,\"say \"\"hi\"\"\",Red");
        assert_eq!(rows[0].get_str(&["Nickname"]), Some(r#"say "hi""#));
        assert_eq!(rows[0].get_str(&["Team"]), Some("Red"));
    }

    #[test]
    fn test_empty_quoted_field() {
        let rows = parse("Player,Nickname,Team\nAnn,\"\",Red");
        assert_eq!(rows[0].get_str(&["Nickname"]), Some(""));
        assert_eq!(rows[0].get_str(&["Team"]), Some("Red"));
    }

    #[test]
    fn test_quoted_commas_in_several_fields() {
        let rows = parse("Player,Team,Gls\n\"Smith, J.\",\"Bibs, Home\",\"2\"");
        assert_eq!(rows[0].get_str(&["Player"]), Some("Smith, J."));
        assert_eq!(rows[0].get_str(&["Team"]), Some("Bibs, Home"));
        assert_eq!(rows[0].get_number(&["Gls"]), Some(2.0));
    }

    #[test]
    fn test_whitespace_and_crlf() {
        let rows = parse("Player , Gls\r\n  Ann ,  2 \r\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str(&["Player"]), Some("Ann"));
        assert_eq!(rows[0].get_number(&["Gls"]), Some(2.0));
    }

    #[test]
    fn test_non_numeric_stays_text() {
        let rows = parse("Player,Gls,Team\nAnn,n/a,7\nBob,,Red");
        assert_eq!(rows[0].get("Gls"), Some(&FieldValue::Text("n/a".to_string())));
        // Team is not a numeric column even when it looks like one
        assert_eq!(rows[0].get("Team"), Some(&FieldValue::Text("7".to_string())));
        assert_eq!(rows[1].get("Gls"), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn test_column_count_mismatch() {
        let rows = parse("Player,Team,Gls\nAnn,Red\nBob,Blue,1,extra,values");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert!(rows[0].get("Gls").is_none());
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[1].get_number(&["Gls"]), Some(1.0));
    }

    #[test]
    fn test_empty_first_column_dropped() {
        let rows = parse("Player,Team\nAnn,Red\n,Blue\n\"\",Green\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str(&["Player"]), Some("Ann"));
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Number(3.0).to_string(), "3");
        assert_eq!(FieldValue::Number(-2.0).to_string(), "-2");
        assert_eq!(FieldValue::Number(1.5).to_string(), "1.5");
        assert_eq!(FieldValue::Text("Red".to_string()).to_string(), "Red");
    }

    #[test]
    fn test_row_serializes_as_map() {
        let rows = parse("Player,Gls,Team\nAnn,2,Red");
        let json = serde_json::to_string(&rows[0]).unwrap();
        assert_eq!(json, r#"{"Player":"Ann","Gls":2.0,"Team":"Red"}"#);
    }

    #[test]
    fn test_quoted_header() {
        let rows = parse("\"Player Name\",\"Gls\"\nAnn,4");
        assert_eq!(rows[0].get_str(&["Player", "Player Name"]), Some("Ann"));
        assert_eq!(rows[0].get_number(&["Gls"]), Some(4.0));
    }
}
