// Presenter module: renders the extracted draws for stdout.

pub mod table;

pub use table::DrawTable;

use crate::config::{AppConfig, OutputFormat};
use crate::model::DrawListing;
use tracing::debug;

/// Renders the listing in the configured output format.
pub fn render(listing: &DrawListing, config: &AppConfig) -> Result<String, serde_json::Error> {
    match config.output {
        OutputFormat::Table => {
            let table = DrawTable::from_rows(&listing.rows).with_limits(config.max_rows, config.min_rows);
            debug!("Rendering {} rows as a table", table.len());
            Ok(table.to_string())
        }
        OutputFormat::Json => serde_json::to_string_pretty(listing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DrawResult, DrawRow};
    use chrono::{TimeZone, Utc};

    fn listing() -> DrawListing {
        DrawListing {
            source: "http://sougaku.com/miniloto/data/list1/".into(),
            fetched_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(),
            draws: vec![DrawResult {
                draw: 1816,
                main: [3, 7, 12, 19, 25],
                bonus: 6,
                set: "B".into(),
            }],
            rows: vec![DrawRow {
                draw: "1816".into(),
                main: ["03", "07", "12", "19", "25"].map(String::from),
                bonus: "06".into(),
                set: "B".into(),
            }],
        }
    }

    #[test]
    fn json_output_contains_typed_fields() {
        let config = AppConfig {
            output: OutputFormat::Json,
            ..AppConfig::default()
        };
        let out = render(&listing(), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["draws"][0]["draw"], 1816);
        assert_eq!(value["draws"][0]["main"], serde_json::json!([3, 7, 12, 19, 25]));
        assert_eq!(value["draws"][0]["set"], "B");
        assert_eq!(value["fetched_at"], "2026-10-18T09:00:00Z");
    }

    #[test]
    fn table_output_is_the_default() {
        let out = render(&listing(), &AppConfig::default()).unwrap();
        assert!(out.starts_with(' '));
        assert!(out.contains("1816"));
        assert!(!out.contains('{'));
    }

    #[test]
    fn table_shows_page_text_and_json_shows_numbers() {
        let table = render(&listing(), &AppConfig::default()).unwrap();
        let cells: Vec<&str> = table.lines().nth(1).unwrap().split_whitespace().collect();
        assert_eq!(cells, vec!["0", "1816", "03", "07", "12", "19", "25", "06", "B"]);

        let config = AppConfig {
            output: OutputFormat::Json,
            ..AppConfig::default()
        };
        let json = render(&listing(), &config).unwrap();
        assert!(!json.contains("\"03\""));
        assert!(!json.contains("rows"));
    }
}
