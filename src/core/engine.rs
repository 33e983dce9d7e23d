use crate::domain::model::{DrawOutcome, Placement, ValidatedDraw};
use crate::domain::ports::ParticipantPool;
use crate::utils::error::{DrawError, Result};
use rand::Rng;
use std::collections::HashSet;

/// In-place Fisher-Yates shuffle.
///
/// Walks from the last index down to 1 and swaps each element with one picked
/// uniformly from `0..=i`, so every permutation is equally likely given an
/// unbiased `rng`. Exactly one draw from `rng` per step.
pub fn fisher_yates_shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Pool minus the manual winners, keeping the pool's read order.
pub fn eligible_participants(pool: Vec<i64>, manual: &[i64]) -> Vec<i64> {
    let excluded: HashSet<i64> = manual.iter().copied().collect();
    pool.into_iter().filter(|n| !excluded.contains(n)).collect()
}

/// Combines manual and random winners into the final ranking.
pub fn merge_winners(draw: &ValidatedDraw, random_winners: Vec<i64>, placement: Placement) -> Vec<i64> {
    match placement {
        Placement::Compact => {
            let mut winners = draw.manual_values();
            winners.extend(random_winners);
            winners
        }
        Placement::Pinned => {
            let mut slots: Vec<Option<i64>> = vec![None; draw.requested_winner_count];
            for manual in &draw.manual_winners {
                if let Some(slot) = manual.position.checked_sub(1).and_then(|i| slots.get_mut(i)) {
                    *slot = Some(manual.value);
                }
            }
            let mut random = random_winners.into_iter();
            slots
                .into_iter()
                .filter_map(|slot| slot.or_else(|| random.next()))
                .collect()
        }
    }
}

pub struct DrawEngine<P: ParticipantPool> {
    pool: P,
    placement: Placement,
}

impl<P: ParticipantPool> DrawEngine<P> {
    pub fn new(pool: P, placement: Placement) -> Self {
        Self { pool, placement }
    }

    /// Fills the remaining slots of a validated draw from the participant pool.
    ///
    /// The pool is only read when there is at least one slot left to draw.
    pub async fn draw<R: Rng + Send>(&self, draw: &ValidatedDraw, rng: &mut R) -> Result<DrawOutcome> {
        let manual_count = draw.manual_winners.len();

        if draw.remaining_slots == 0 {
            tracing::debug!("All {} winners pinned manually, skipping pool read", manual_count);
            return Ok(DrawOutcome {
                winners: merge_winners(draw, Vec::new(), self.placement),
                manual_count,
                random_count: 0,
                eligible_count: None,
                drawn_at: chrono::Utc::now(),
            });
        }

        let pool = self.pool.load_participants().await?;
        let pool_size = pool.len();
        let mut eligible = eligible_participants(pool, &draw.manual_values());

        tracing::debug!(
            "Loaded {} participants, {} eligible after removing manual winners",
            pool_size,
            eligible.len()
        );

        if eligible.len() < draw.remaining_slots {
            return Err(DrawError::InsufficientParticipants {
                needed: draw.remaining_slots,
                available: eligible.len(),
            });
        }

        let eligible_count = eligible.len();
        fisher_yates_shuffle(&mut eligible, rng);
        eligible.truncate(draw.remaining_slots);

        Ok(DrawOutcome {
            winners: merge_winners(draw, eligible, self.placement),
            manual_count,
            random_count: draw.remaining_slots,
            eligible_count: Some(eligible_count),
            drawn_at: chrono::Utc::now(),
        })
    }
}
