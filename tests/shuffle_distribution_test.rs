use raffle_draw::core::engine::fisher_yates_shuffle;
use raffle_draw::{DrawRequest, InMemoryPool, Placement, Raffle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

#[test]
fn test_every_permutation_is_roughly_equally_likely() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let trials = 60_000;
    let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();

    for _ in 0..trials {
        let mut items = vec![1u8, 2, 3, 4];
        fisher_yates_shuffle(&mut items, &mut rng);
        *counts.entry(items).or_default() += 1;
    }

    // 4! permutations, 2500 expected each.
    assert_eq!(counts.len(), 24);
    let expected = trials as f64 / 24.0;
    for (permutation, count) in &counts {
        let deviation = (*count as f64 - expected).abs() / expected;
        assert!(
            deviation < 0.1,
            "permutation {:?} seen {} times, expected about {}",
            permutation,
            count,
            expected
        );
    }
}

#[tokio::test]
async fn test_each_participant_wins_each_slot_uniformly() {
    let pool: Vec<i64> = (1..=10).collect();
    let raffle = Raffle::new(InMemoryPool::new(pool.clone()), Placement::Compact);
    let request = DrawRequest::new(3);
    let mut rng = StdRng::seed_from_u64(31337);

    let trials = 30_000;
    let mut hits: HashMap<(usize, i64), usize> = HashMap::new();
    let mut wins: HashMap<i64, usize> = HashMap::new();

    for _ in 0..trials {
        let outcome = raffle.run(&request, &mut rng).await.unwrap();
        for (slot, winner) in outcome.winners.iter().enumerate() {
            *hits.entry((slot, *winner)).or_default() += 1;
            *wins.entry(*winner).or_default() += 1;
        }
    }

    // Each participant wins with probability 3/10 overall, 1/10 per slot.
    let per_slot = trials as f64 / 10.0;
    for slot in 0..3 {
        for participant in &pool {
            let count = *hits.get(&(slot, *participant)).unwrap_or(&0) as f64;
            assert!(
                (count - per_slot).abs() / per_slot < 0.1,
                "participant {} took slot {} {} times, expected about {}",
                participant,
                slot + 1,
                count,
                per_slot
            );
        }
    }

    let overall = trials as f64 * 3.0 / 10.0;
    for participant in &pool {
        let count = *wins.get(participant).unwrap_or(&0) as f64;
        assert!((count - overall).abs() / overall < 0.05);
    }
}
