// Results-table parsing for the Mini Loto listing page
use crate::config::{ColumnLayout, ExtractConfig};
use crate::model::{DrawRow, ParserError};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Highest cell position a layout may name.
pub const MAX_CELL_INDEX: usize = 255;

pub trait Parser {
    fn parse(&self, html: &str) -> Result<Vec<DrawRow>, ParserError>;
}

pub struct MiniLotoParser {
    config: ExtractConfig,
    row_selector: Selector,
    cell_selector: Selector,
}

impl MiniLotoParser {
    pub fn new(config: ExtractConfig) -> Result<Self, ParserError> {
        check_layout(&config.layout)?;
        let row_selector = Selector::parse(&config.row_selector)
            .map_err(|e| ParserError::Selector(format!("{}: {}", config.row_selector, e)))?;
        let cell_selector = Selector::parse(&config.cell_selector)
            .map_err(|e| ParserError::Selector(format!("{}: {}", config.cell_selector, e)))?;

        Ok(Self {
            config,
            row_selector,
            cell_selector,
        })
    }

    fn cell_texts(&self, row: ElementRef<'_>) -> Vec<String> {
        row.select(&self.cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect()
    }

    fn is_excluded(&self, cells: &[String]) -> bool {
        cells.iter().any(|text| {
            self.config
                .exclude_markers
                .iter()
                .any(|marker| !marker.is_empty() && text.contains(marker.as_str()))
        })
    }

    fn map_row(&self, mut cells: Vec<String>) -> DrawRow {
        let layout = &self.config.layout;
        let mut take = |i: usize| std::mem::take(&mut cells[i]);

        DrawRow {
            draw: take(layout.draw),
            main: layout.main.map(&mut take),
            bonus: take(layout.bonus),
            set: take(layout.set),
        }
    }
}

/// Positions must be distinct and at most [`MAX_CELL_INDEX`].
fn check_layout(layout: &ColumnLayout) -> Result<(), ParserError> {
    let positions = layout.positions();
    for (n, &pos) in positions.iter().enumerate() {
        if pos > MAX_CELL_INDEX {
            return Err(ParserError::Layout(format!(
                "cell index {} exceeds {}",
                pos, MAX_CELL_INDEX
            )));
        }
        if positions[..n].contains(&pos) {
            return Err(ParserError::Layout(format!("cell index {} used twice", pos)));
        }
    }
    Ok(())
}

impl Parser for MiniLotoParser {
    fn parse(&self, html: &str) -> Result<Vec<DrawRow>, ParserError> {
        let document = Html::parse_document(html);
        let required = self.config.layout.required_cells();

        let mut rows = Vec::new();

        for (index, row) in document
            .select(&self.row_selector)
            .enumerate()
            .skip(self.config.skip_rows)
        {
            let cells = self.cell_texts(row);

            if cells.is_empty() {
                continue;
            }
            if self.is_excluded(&cells) {
                debug!("Row {}: statistics row, skipped", index);
                continue;
            }
            if cells.len() < required {
                debug!("Row {}: {} cells, need {}, skipped", index, cells.len(), required);
                continue;
            }

            rows.push(self.map_row(cells));
        }

        if rows.is_empty() {
            warn!("No draw rows found; the page layout may have changed");
        }

        Ok(rows)
    }
}
