use crate::adapters::pool::PoolFormat;
use crate::domain::model::Placement;
use crate::utils::error::{DrawError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manual slots read from the wire when nothing else is configured (`puesto1`..`puesto10`).
pub const DEFAULT_MAX_MANUAL_SLOTS: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RaffleConfig {
    pub pool: PoolConfig,
    pub draw: DrawConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub source: String,
    pub format: PoolFormat,
    /// CSV column, or JSON object key, holding the participant number.
    pub column: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            source: "participants.csv".to_string(),
            format: PoolFormat::Csv,
            column: "value".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub max_manual_slots: usize,
    pub placement: Placement,
    /// Fixed seed for reproducible draws. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            max_manual_slots: DEFAULT_MAX_MANUAL_SLOTS,
            placement: Placement::Compact,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl RaffleConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DrawError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${POOL_SOURCE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DrawError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for RaffleConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_path("pool.source", &self.pool.source)?;
        validate_no_placeholder("pool.source", &self.pool.source)?;
        validate_non_empty_string("pool.column", &self.pool.column)?;
        validate_no_placeholder("pool.column", &self.pool.column)?;
        validate_range("draw.max_manual_slots", self.draw.max_manual_slots, 1, 1000)?;
        validate_one_of(
            "logging.level",
            &self.logging.level,
            &["trace", "debug", "info", "warn", "error"],
        )?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
