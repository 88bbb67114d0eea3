use crate::model::DrawRow;
use std::fmt;

pub const DRAW_COLUMNS: [&str; 8] = [
    "抽選回", "本数字1", "本数字2", "本数字3", "本数字4", "本数字5", "B数字", "セット",
];

const COLUMN_GAP: &str = "  ";

/// Named columns plus string rows, printed like a dataframe.
#[derive(Debug, Clone)]
pub struct DrawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    max_rows: usize,
    min_rows: usize,
}

impl DrawTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            max_rows: 60,
            min_rows: 10,
        }
    }

    /// Cells are the trimmed page text, so "03" stays "03".
    pub fn from_rows(rows: &[DrawRow]) -> Self {
        let mut table = Self::new(DRAW_COLUMNS);
        for draw in rows {
            let mut row = Vec::with_capacity(DRAW_COLUMNS.len());
            row.push(draw.draw.clone());
            row.extend(draw.main.iter().cloned());
            row.push(draw.bonus.clone());
            row.push(draw.set.clone());
            table.push_row(row);
        }
        table
    }

    /// Tables longer than `max_rows` print only `min_rows / 2` rows from each end.
    pub fn with_limits(mut self, max_rows: usize, min_rows: usize) -> Self {
        self.max_rows = max_rows;
        self.min_rows = min_rows;
        self
    }

    /// Appends a row; missing cells are left blank, extra cells dropped.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows printed from each end of a truncated table.
    fn edge_rows(&self) -> usize {
        (self.min_rows / 2).max(1)
    }

    /// Only when the head and tail leave something out.
    fn is_truncated(&self) -> bool {
        self.rows.len() > self.max_rows && self.edge_rows().saturating_mul(2) < self.rows.len()
    }

    /// Row indices to print, `None` marking the elided gap.
    fn visible_rows(&self) -> Vec<Option<usize>> {
        if !self.is_truncated() {
            return (0..self.rows.len()).map(Some).collect();
        }
        let edge = self.edge_rows();
        let mut visible: Vec<Option<usize>> = (0..edge).map(Some).collect();
        visible.push(None);
        visible.extend((self.rows.len() - edge..self.rows.len()).map(Some));
        visible
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad_left(s: &str, w: usize) -> String {
    format!("{}{}", " ".repeat(w.saturating_sub(width(s))), s)
}

fn pad_right(s: &str, w: usize) -> String {
    format!("{}{}", s, " ".repeat(w.saturating_sub(width(s))))
}

impl fmt::Display for DrawTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            writeln!(f, "Empty DataFrame")?;
            writeln!(f, "Columns: [{}]", self.columns.join(", "))?;
            return write!(f, "Index: []");
        }

        let visible = self.visible_rows();

        let index_labels: Vec<String> = visible
            .iter()
            .map(|r| r.map_or_else(|| "..".to_string(), |i| i.to_string()))
            .collect();
        let index_width = index_labels.iter().map(|s| width(s)).max().unwrap_or(0);

        let col_widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, name)| {
                visible
                    .iter()
                    .map(|r| r.map_or(3, |i| width(&self.rows[i][c])))
                    .fold(width(name), usize::max)
            })
            .collect();

        let mut header = " ".repeat(index_width);
        for (name, w) in self.columns.iter().zip(&col_widths) {
            header.push_str(COLUMN_GAP);
            header.push_str(&pad_left(name, *w));
        }
        write!(f, "{}", header)?;

        for (label, row) in index_labels.iter().zip(&visible) {
            let mut line = pad_right(label, index_width);
            for (c, w) in col_widths.iter().enumerate() {
                let cell = row.map_or("...", |i| self.rows[i][c].as_str());
                line.push_str(COLUMN_GAP);
                line.push_str(&pad_left(cell, *w));
            }
            write!(f, "\n{}", line)?;
        }

        if self.is_truncated() {
            write!(f, "\n\n[{} rows x {} columns]", self.rows.len(), self.columns.len())?;
        }

        Ok(())
    }
}
