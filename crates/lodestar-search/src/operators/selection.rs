//! Tournament selection.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::operators::ranking::FrontRank;

/// Pick one population index by tournament.
///
/// Samples `tournament_size` distinct contestants uniformly at random and
/// returns the one with the best (lowest) front rank; rank ties go to the
/// higher crowding distance; full ties are decided uniformly at random.
/// No state beyond the supplied PRNG.
pub fn tournament_select(
    ranks: &[FrontRank],
    tournament_size: usize,
    rng: &mut ChaCha8Rng,
) -> usize {
    debug_assert!(!ranks.is_empty(), "tournament over an empty population");

    let amount = tournament_size.clamp(1, ranks.len());
    let contestants = rand::seq::index::sample(rng, ranks.len(), amount);

    let mut best: Vec<usize> = Vec::with_capacity(amount);
    for candidate in contestants {
        let Some(&current) = best.first() else {
            best.push(candidate);
            continue;
        };

        let (c, b) = (&ranks[candidate], &ranks[current]);
        if c.rank < b.rank || (c.rank == b.rank && c.crowding > b.crowding) {
            best.clear();
            best.push(candidate);
        } else if c.rank == b.rank && c.crowding == b.crowding {
            best.push(candidate);
        }
    }

    if best.len() == 1 {
        best[0]
    } else {
        best[rng.gen_range(0..best.len())]
    }
}
