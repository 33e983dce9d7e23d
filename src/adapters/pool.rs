use crate::config::toml_config::PoolConfig;
use crate::domain::model::as_integer;
use crate::domain::ports::ParticipantPool;
use crate::utils::error::{DrawError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolFormat {
    /// CSV with a header row; numbers are read from one named column.
    #[default]
    Csv,
    /// JSON array of integers, or of objects holding the number under the column key.
    Json,
    /// One integer per line. Blank lines and `#` comments are skipped.
    Lines,
}

impl FromStr for PoolFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(PoolFormat::Csv),
            "json" => Ok(PoolFormat::Json),
            "lines" | "txt" => Ok(PoolFormat::Lines),
            other => Err(format!(
                "unknown pool format '{}', expected csv, json or lines",
                other
            )),
        }
    }
}

/// Fixed pool held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPool {
    values: Vec<i64>,
}

impl InMemoryPool {
    pub fn new(values: Vec<i64>) -> Self {
        Self {
            values: dedup_preserving_order(values),
        }
    }
}

impl FromIterator<i64> for InMemoryPool {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl ParticipantPool for InMemoryPool {
    async fn load_participants(&self) -> Result<Vec<i64>> {
        Ok(self.values.clone())
    }
}

/// Pool read from a file on every draw, so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct FilePool {
    path: PathBuf,
    format: PoolFormat,
    column: String,
}

impl FilePool {
    pub fn new(path: impl Into<PathBuf>, format: PoolFormat) -> Self {
        Self {
            path: path.into(),
            format,
            column: "value".to_string(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(&config.source, config.format).with_column(&config.column)
    }
}

#[async_trait]
impl ParticipantPool for FilePool {
    async fn load_participants(&self) -> Result<Vec<i64>> {
        tracing::debug!("Reading participant pool from {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;

        let values = match self.format {
            PoolFormat::Csv => parse_csv(&data, &self.column)?,
            PoolFormat::Json => parse_json(&data, &self.column)?,
            PoolFormat::Lines => parse_lines(&data)?,
        };

        Ok(dedup_preserving_order(values))
    }
}

pub fn parse_csv(data: &[u8], column: &str) -> Result<Vec<i64>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let index = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DrawError::PoolError {
            message: format!("CSV pool has no '{}' column", column),
        })?;

    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = record.get(index).unwrap_or("");
        let value = field.parse::<i64>().map_err(|_| DrawError::PoolError {
            message: format!("row {}: '{}' is not an integer", row + 2, field),
        })?;
        values.push(value);
    }
    Ok(values)
}

pub fn parse_json(data: &[u8], column: &str) -> Result<Vec<i64>> {
    let items: Vec<serde_json::Value> = serde_json::from_slice(data)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let number = match item {
                serde_json::Value::Object(obj) => obj.get(column),
                other => Some(other),
            };
            number.and_then(as_integer).ok_or_else(|| DrawError::PoolError {
                message: format!("item {}: {} is not an integer participant", index, item),
            })
        })
        .collect()
}

pub fn parse_lines(data: &[u8]) -> Result<Vec<i64>> {
    let text = std::str::from_utf8(data).map_err(|e| DrawError::PoolError {
        message: format!("pool file is not valid UTF-8: {}", e),
    })?;

    let mut values = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let value = line.parse::<i64>().map_err(|_| DrawError::PoolError {
            message: format!("line {}: '{}' is not an integer", line_no + 1, line),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Keeps the first occurrence of every number.
pub fn dedup_preserving_order(values: Vec<i64>) -> Vec<i64> {
    let total = values.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<i64> = values.into_iter().filter(|v| seen.insert(*v)).collect();

    if unique.len() < total {
        tracing::warn!(
            "⚠️ Dropped {} duplicate participant numbers from the pool",
            total - unique.len()
        );
    }
    unique
}
