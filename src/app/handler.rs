use crate::app::wire::{parse_request, DrawReply};
use crate::core::raffle::Raffle;
use crate::domain::model::DrawOutcome;
use crate::domain::ports::ParticipantPool;
use crate::utils::error::{DrawError, Result};
use rand::Rng;

/// Entry point for one draw request in wire form.
pub struct DrawHandler<P: ParticipantPool> {
    raffle: Raffle<P>,
    max_manual_slots: usize,
}

impl<P: ParticipantPool> DrawHandler<P> {
    pub fn new(raffle: Raffle<P>, max_manual_slots: usize) -> Self {
        Self {
            raffle,
            max_manual_slots,
        }
    }

    pub async fn draw<R: Rng + Send>(&self, body: &serde_json::Value, rng: &mut R) -> Result<DrawOutcome> {
        let request = parse_request(body, self.max_manual_slots);
        let result = self.raffle.run(&request, rng).await;

        if let Err(e) = &result {
            if e.kind().is_client_error() {
                tracing::info!("Draw rejected ({:?}): {}", e.kind(), e);
            } else {
                tracing::error!("❌ Error performing draw: {}", e);
            }
        }

        result
    }

    pub async fn handle<R: Rng + Send>(&self, body: &serde_json::Value, rng: &mut R) -> DrawReply {
        DrawReply::from_result(&self.draw(body, rng).await)
    }

    /// Like [`handle`](Self::handle), for a raw JSON body. Unparseable bodies are internal failures.
    pub async fn handle_str<R: Rng + Send>(&self, body: &str, rng: &mut R) -> DrawReply {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => self.handle(&value, rng).await,
            Err(e) => {
                let e = DrawError::from(e);
                tracing::error!("❌ Error reading draw request: {}", e);
                DrawReply::failure(&e)
            }
        }
    }
}
