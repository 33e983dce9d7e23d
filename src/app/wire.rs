use crate::domain::model::{DrawOutcome, DrawRequest};
use crate::utils::error::{DrawError, Result};
use serde::{Deserialize, Serialize};

pub const COUNT_FIELD: &str = "cantidadGanadores";
pub const POSITION_PREFIX: &str = "puesto";

/// Maps a wire body onto a [`DrawRequest`].
///
/// `puesto1`..`puesto{max_slots}` become manual slots 1..max_slots. Higher
/// slots are ignored. A missing count stays `null` so validation reports it.
pub fn parse_request(body: &serde_json::Value, max_slots: usize) -> DrawRequest {
    let requested_winner_count = body
        .get(COUNT_FIELD)
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    let mut request = DrawRequest {
        requested_winner_count,
        manual_positions: Vec::new(),
    };

    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            let Some(position) = slot_from_key(key) else {
                continue;
            };
            if position == 0 || position > max_slots {
                tracing::warn!("Ignoring {}: only {} manual slots are accepted", key, max_slots);
                continue;
            }
            if !value.is_null() {
                request.set_manual(position, value.clone());
            }
        }
    }

    request
}

/// Slot number of a `puestoN` key. Only the canonical spelling counts, so
/// `puesto01` and `puesto+1` are not slot 1.
fn slot_from_key(key: &str) -> Option<usize> {
    let suffix = key.strip_prefix(POSITION_PREFIX)?;
    let position = suffix.parse::<usize>().ok()?;
    (position.to_string() == suffix).then_some(position)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DrawResponse {
    Success { ganadores: Vec<i64> },
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawReply {
    pub status: u16,
    pub body: DrawResponse,
}

impl DrawReply {
    pub fn success(outcome: &DrawOutcome) -> Self {
        Self {
            status: 200,
            body: DrawResponse::Success {
                ganadores: outcome.winners.clone(),
            },
        }
    }

    pub fn failure(error: &DrawError) -> Self {
        Self {
            status: error.status_code(),
            body: DrawResponse::Failure {
                message: error.user_friendly_message(),
            },
        }
    }

    pub fn from_result(result: &Result<DrawOutcome>) -> Self {
        match result {
            Ok(outcome) => Self::success(outcome),
            Err(e) => Self::failure(e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}
