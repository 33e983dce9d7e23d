use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where manual winners end up in the final list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Manual winners first, in slot order, then the random winners.
    #[default]
    Compact,
    /// Each manual winner keeps its own slot; random winners fill the gaps.
    Pinned,
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Placement::Compact),
            "pinned" => Ok(Placement::Pinned),
            other => Err(format!(
                "unknown placement '{}', expected 'compact' or 'pinned'",
                other
            )),
        }
    }
}

/// A draw as the caller sent it.
///
/// Values are kept raw so the validator can tell "not an integer" apart from
/// "missing". `manual_positions[0]` is finishing position 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub requested_winner_count: serde_json::Value,
    pub manual_positions: Vec<Option<serde_json::Value>>,
}

impl DrawRequest {
    pub fn new(requested_winner_count: i64) -> Self {
        Self {
            requested_winner_count: requested_winner_count.into(),
            manual_positions: Vec::new(),
        }
    }

    /// Pins `value` at the 1-based finishing `position`.
    pub fn with_manual(mut self, position: usize, value: impl Into<serde_json::Value>) -> Self {
        self.set_manual(position, value.into());
        self
    }

    pub fn set_manual(&mut self, position: usize, value: serde_json::Value) {
        if position == 0 {
            return;
        }
        if self.manual_positions.len() < position {
            self.manual_positions.resize(position, None);
        }
        self.manual_positions[position - 1] = Some(value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualWinner {
    /// 1-based slot the caller pinned this value to.
    pub position: usize,
    pub value: i64,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraw {
    pub requested_winner_count: usize,
    pub manual_winners: Vec<ManualWinner>,
    pub remaining_slots: usize,
}

impl ValidatedDraw {
    pub fn manual_values(&self) -> Vec<i64> {
        self.manual_winners.iter().map(|m| m.value).collect()
    }

    /// Rebuilds a request that validates back to `self`.
    pub fn to_request(&self) -> DrawRequest {
        let mut request = DrawRequest::new(self.requested_winner_count as i64);
        for manual in &self.manual_winners {
            request.set_manual(manual.position, manual.value.into());
        }
        request
    }
}

/// The result of a successful draw. `winners[0]` is finishing rank 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawOutcome {
    pub winners: Vec<i64>,
    pub manual_count: usize,
    pub random_count: usize,
    /// Size of the eligible pool, `None` when the pool was never read.
    pub eligible_count: Option<usize>,
    pub drawn_at: DateTime<Utc>,
}

/// Reads a JSON number as an integer. Integral floats such as `3.0` count.
///
/// Participant numbers and counts live in the `i64` domain; whole numbers
/// outside it yield `None` here and are reported via [`is_out_of_range_integer`].
pub fn as_integer(value: &serde_json::Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// True for a whole JSON number that does not fit in an `i64`.
pub fn is_out_of_range_integer(value: &serde_json::Value) -> bool {
    if value.is_u64() || value.is_i64() {
        return value.as_i64().is_none();
    }
    match value.as_f64() {
        Some(f) => f.is_finite() && f.fract() == 0.0 && as_integer(value).is_none(),
        None => false,
    }
}
