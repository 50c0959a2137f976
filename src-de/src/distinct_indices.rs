use rand::Rng;

/// Draw `count` pairwise distinct indices from `0..pool_size` by rejection.
///
/// Each draw is `floor(u * pool_size)` for a fresh uniform `u`; a draw equal to an
/// earlier pick is rejected and repeated. The current target is not excluded.
pub fn distinct_indices<R: Rng + ?Sized>(count: usize, pool_size: usize, rng: &mut R) -> Vec<usize> {
    debug_assert!(count <= pool_size);
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let idx = (rng.random::<f64>() * pool_size as f64) as usize;
        if !out.contains(&idx) {
            out.push(idx);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_indices_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let idx = distinct_indices(3, 4, &mut rng);
            assert_eq!(idx.len(), 3);
            assert!(idx.iter().all(|&k| k < 4));
            assert!(idx[0] != idx[1] && idx[0] != idx[2] && idx[1] != idx[2]);
        }
    }

    #[test]
    fn test_draw_order_follows_stream() {
        let mut rng = StdRng::seed_from_u64(42);
        let idx = distinct_indices(3, 100, &mut rng);

        let mut replay = StdRng::seed_from_u64(42);
        let first = (replay.random::<f64>() * 100.0) as usize;
        assert_eq!(idx[0], first);
    }
}
