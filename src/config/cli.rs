use crate::adapters::pool::PoolFormat;
use crate::config::toml_config::RaffleConfig;
use crate::domain::model::Placement;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::Parser;
use std::str::FromStr;

/// `POSITION=NUMBER`, e.g. `1=61543` pins 61543 as first place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualPin {
    pub position: usize,
    pub value: i64,
}

impl FromStr for ManualPin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (position, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected POSITION=NUMBER, got '{}'", s))?;
        let position: usize = position
            .trim()
            .parse()
            .map_err(|_| format!("invalid position '{}'", position))?;
        if position == 0 {
            return Err("positions start at 1".to_string());
        }
        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid number '{}'", value))?;
        Ok(Self { position, value })
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "raffle-draw")]
#[command(about = "Draw raffle winners from a pool of registered numbers")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Participant pool file (overrides pool.source)
    #[arg(long)]
    pub pool: Option<String>,

    /// Pool file format: csv, json or lines
    #[arg(long)]
    pub format: Option<PoolFormat>,

    /// Column or key holding the participant number
    #[arg(long)]
    pub column: Option<String>,

    /// Number of winners to draw
    #[arg(short = 'n', long)]
    pub count: Option<i64>,

    /// Pin a winner: POSITION=NUMBER (repeatable)
    #[arg(short, long = "manual")]
    pub manual: Vec<ManualPin>,

    /// JSON request file with cantidadGanadores and puestoN fields
    #[arg(long, conflicts_with_all = ["count", "manual"])]
    pub request: Option<String>,

    /// Seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Manual placement: compact or pinned
    #[arg(long)]
    pub placement: Option<Placement>,

    /// Highest puestoN field read from a request
    #[arg(long)]
    pub max_manual_slots: Option<usize>,

    /// Print the full draw report instead of the wire response
    #[arg(long)]
    pub report: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Applies command-line overrides on top of the file configuration.
    pub fn apply_to(&self, config: &mut RaffleConfig) {
        if let Some(pool) = &self.pool {
            config.pool.source = pool.clone();
        }
        if let Some(format) = self.format {
            config.pool.format = format;
        }
        if let Some(column) = &self.column {
            config.pool.column = column.clone();
        }
        if let Some(seed) = self.seed {
            config.draw.seed = Some(seed);
        }
        if let Some(placement) = self.placement {
            config.draw.placement = placement;
        }
        if let Some(max) = self.max_manual_slots {
            config.draw.max_manual_slots = max;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }

    /// Builds the wire request, from `--request` or from `--count`/`--manual`.
    pub fn request_body(&self) -> Result<serde_json::Value> {
        if let Some(path) = &self.request {
            let content = std::fs::read(path)?;
            return Ok(serde_json::from_slice(&content)?);
        }

        let count = validate_required_field("count", &self.count)?;
        let mut body = serde_json::Map::new();
        body.insert("cantidadGanadores".to_string(), (*count).into());
        for pin in &self.manual {
            body.insert(format!("puesto{}", pin.position), pin.value.into());
        }
        Ok(serde_json::Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_manual_pin_from_str() {
        assert_eq!(
            "1=61543".parse::<ManualPin>().unwrap(),
            ManualPin {
                position: 1,
                value: 61543
            }
        );
        assert!("0=5".parse::<ManualPin>().is_err());
        assert!("1:5".parse::<ManualPin>().is_err());
        assert!("1=five".parse::<ManualPin>().is_err());
    }

    #[test]
    fn test_request_body_from_flags() {
        let cli = CliConfig::parse_from(["raffle-draw", "-n", "3", "-m", "2=99"]);
        assert_eq!(
            cli.request_body().unwrap(),
            json!({"cantidadGanadores": 3, "puesto2": 99})
        );
    }

    #[test]
    fn test_request_body_requires_count() {
        let cli = CliConfig::parse_from(["raffle-draw"]);
        assert!(cli.request_body().is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = CliConfig::parse_from([
            "raffle-draw",
            "--pool",
            "pool.json",
            "--format",
            "json",
            "--seed",
            "9",
            "--placement",
            "pinned",
            "-n",
            "1",
        ]);
        let mut config = RaffleConfig::default();
        cli.apply_to(&mut config);

        assert_eq!(config.pool.source, "pool.json");
        assert_eq!(config.pool.format, PoolFormat::Json);
        assert_eq!(config.draw.seed, Some(9));
        assert_eq!(config.draw.placement, Placement::Pinned);
    }
}
