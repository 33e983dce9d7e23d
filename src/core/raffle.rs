use crate::core::engine::DrawEngine;
use crate::core::validator::RequestValidator;
use crate::domain::model::{DrawOutcome, DrawRequest, Placement};
use crate::domain::ports::ParticipantPool;
use crate::utils::error::Result;
use rand::Rng;

/// Validate-then-draw, one request at a time.
pub struct Raffle<P: ParticipantPool> {
    validator: RequestValidator,
    engine: DrawEngine<P>,
}

impl<P: ParticipantPool> Raffle<P> {
    pub fn new(pool: P, placement: Placement) -> Self {
        Self {
            validator: RequestValidator::new(placement),
            engine: DrawEngine::new(pool, placement),
        }
    }

    pub async fn run<R: Rng + Send>(&self, request: &DrawRequest, rng: &mut R) -> Result<DrawOutcome> {
        let validated = self.validator.validate(request)?;
        let outcome = self.engine.draw(&validated, rng).await?;

        tracing::info!(
            "🎉 Draw complete: {} winners ({} manual, {} random)",
            outcome.winners.len(),
            outcome.manual_count,
            outcome.random_count
        );
        tracing::debug!("Winners in finishing order: {:?}", outcome.winners);

        Ok(outcome)
    }
}
