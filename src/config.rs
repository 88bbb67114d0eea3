use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;

pub const DEFAULT_URL: &str = "http://sougaku.com/miniloto/data/list1/";

/// Cell positions of each field inside a data row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub draw: usize,
    pub main: [usize; 5],
    pub bonus: usize,
    pub set: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            draw: 0,
            main: [1, 2, 3, 4, 5],
            bonus: 6,
            set: 7,
        }
    }
}

impl ColumnLayout {
    /// Minimum number of cells a row needs to fill every field.
    pub fn required_cells(&self) -> usize {
        let highest = self.main.iter().copied().fold(self.draw.max(self.bonus).max(self.set), usize::max);
        highest.saturating_add(1)
    }

    /// Every field position, in row order: draw, main 1..5, bonus, set.
    pub fn positions(&self) -> [usize; 8] {
        let [m1, m2, m3, m4, m5] = self.main;
        [self.draw, m1, m2, m3, m4, m5, self.bonus, self.set]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    #[default]
    Skip,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub row_selector: String,
    pub cell_selector: String,
    /// Header rows plus the placeholder "draw 0" entry.
    pub skip_rows: usize,
    pub exclude_markers: Vec<String>,
    pub on_malformed: MalformedRowPolicy,
    pub layout: ColumnLayout,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            row_selector: "tr".into(),
            cell_selector: "td".into(),
            skip_rows: 8,
            exclude_markers: vec!["％".into(), "%".into()],
            on_malformed: MalformedRowPolicy::Skip,
            layout: ColumnLayout::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub output: OutputFormat,
    pub max_rows: usize,
    pub min_rows: usize,
    pub extract: ExtractConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) MiniLotoSniper/0.1".into(),
            timeout_seconds: 30,
            max_retries: 0,
            retry_base_delay_ms: 500,
            output: OutputFormat::Table,
            max_rows: 60,
            min_rows: 10,
            extract: ExtractConfig::default(),
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Like [`load_config`], but a missing file means built-in defaults.
pub fn load_config_or_default(path: &str) -> Result<AppConfig, ConfigError> {
    match load_config(path) {
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::default()),
        other => other,
    }
}
