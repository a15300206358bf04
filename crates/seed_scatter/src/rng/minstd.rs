//! Park–Miller "minimal standard" Lehmer generator.
//!
//! [`MinStdRng`] is the only source of randomness used while sampling cells. Its
//! whole state is one integer in `[1, 2^31 - 2]`, so a generator can be rebuilt
//! from a cell hash at any time without threading state between cells.

/// Modulus of the generator, the Mersenne prime `2^31 - 1`.
pub const MODULUS: u32 = 2_147_483_647;

/// Multiplier of the generator (`7^5`).
pub const MULTIPLIER: u64 = 16_807;

/// Largest bound accepted by [`MinStdRng::uniform_int`].
///
/// The generator emits `MODULUS - 1` distinct values, so `[0, n]` can be
/// covered without bias only while `n + 1 <= MODULUS - 1`.
pub const MAX_UNIFORM_BOUND: u32 = MODULUS - 2;

// Next power of two above the modulus. Dividing by the modulus itself would
// let the largest draw round to exactly 1.0 in single precision.
const CANONICAL_DIVISOR: f64 = 2_147_483_648.0;

/// Seedable multiplicative congruential generator `state <- state * 16807 mod (2^31 - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinStdRng {
    state: u32,
}

impl MinStdRng {
    /// Creates a generator from a state in `[1, 2^31 - 2]`.
    ///
    /// Panics on `0` (a fixed point of the recurrence) or on values `>= 2^31 - 1`.
    pub fn new(state: u32) -> Self {
        assert!(
            state != 0 && state < MODULUS,
            "generator state must be in [1, 2^31 - 2], got {state}"
        );
        Self { state }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the recurrence and returns the new state.
    #[inline]
    pub fn advance(&mut self) -> u32 {
        debug_assert!(self.state != 0, "generator state reached 0");
        self.state = ((self.state as u64 * MULTIPLIER) % MODULUS as u64) as u32;
        self.state
    }

    /// Draws a value in `[0, 1)`.
    #[inline]
    pub fn canonical(&mut self) -> f64 {
        (self.advance() - 1) as f64 / CANONICAL_DIVISOR
    }

    /// Draws an integer uniformly from `[0, n]` by rejection sampling.
    ///
    /// Panics if `n > MAX_UNIFORM_BOUND`.
    pub fn uniform_int(&mut self, n: u32) -> u32 {
        assert!(
            n <= MAX_UNIFORM_BOUND,
            "uniform_int bound {n} exceeds {MAX_UNIFORM_BOUND}"
        );
        let range = n as u64 + 1;
        let scaling = MODULUS as u64 / range;
        let past = range * scaling;
        loop {
            let draw = (self.advance() - 1) as u64;
            if draw < past {
                return (draw / scaling) as u32;
            }
        }
    }

    /// Fills `out` with a uniformly random permutation of `0..out.len()`.
    ///
    /// Inside-out Knuth shuffle: slot `i` swaps with a uniform slot in `[0, i]`.
    pub fn permute_into(&mut self, out: &mut [u32]) {
        assert!(
            out.len() <= MAX_UNIFORM_BOUND as usize + 1,
            "permutation length {} exceeds generator range",
            out.len()
        );
        for i in 0..out.len() {
            let j = self.uniform_int(i as u32) as usize;
            out[i] = out[j];
            out[j] = i as u32;
        }
    }

    /// Returns a uniformly random permutation of `0..n`.
    pub fn permutation(&mut self, n: usize) -> Vec<u32> {
        let mut out = vec![0; n];
        self.permute_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::hash::{combine, hash_cell, CellKey};

    fn chi_square(counts: &[u64], expected: f64) -> f64 {
        counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum()
    }

    #[test]
    fn advance_matches_minimal_standard_sequence() {
        let mut rng = MinStdRng::new(1);
        let seq: Vec<u32> = (0..5).map(|_| rng.advance()).collect();
        assert_eq!(seq, vec![16807, 282475249, 1622650073, 984943658, 1144108930]);
        assert_eq!(rng.state(), 1144108930);
    }

    #[test]
    #[should_panic(expected = "generator state")]
    fn zero_state_is_rejected() {
        let _ = MinStdRng::new(0);
    }

    #[test]
    #[should_panic(expected = "generator state")]
    fn modulus_state_is_rejected() {
        let _ = MinStdRng::new(MODULUS);
    }

    #[test]
    fn canonical_covers_both_extremes_inside_unit_interval() {
        // 1407677000 is the inverse of 16807, so the next state is 1.
        let mut low = MinStdRng::new(1_407_677_000);
        assert_eq!(low.canonical(), 0.0);

        // The next state is MODULUS - 1, the largest possible draw.
        let mut high = MinStdRng::new(739_806_647);
        let top = high.canonical();
        assert!(top < 1.0);
        assert_eq!(top, (MODULUS - 2) as f64 / 2_147_483_648.0);
    }

    #[test]
    fn uniform_int_zero_always_returns_zero() {
        let mut rng = MinStdRng::new(42);
        for _ in 0..100 {
            assert_eq!(rng.uniform_int(0), 0);
        }
    }

    #[test]
    fn uniform_int_largest_bound_accepts_every_draw() {
        let mut rng = MinStdRng::new(7);
        let mut copy = rng;
        let value = rng.uniform_int(MAX_UNIFORM_BOUND);
        assert_eq!(value, copy.advance() - 1);
    }

    #[test]
    #[should_panic(expected = "uniform_int bound")]
    fn uniform_int_rejects_out_of_range_bound() {
        let mut rng = MinStdRng::new(1);
        let _ = rng.uniform_int(MODULUS);
    }

    #[test]
    fn uniform_int_six_has_no_modulo_bias() {
        let mut rng = MinStdRng::new(20_240_601);
        let draws = 70_000u64;
        let mut counts = [0u64; 7];
        for _ in 0..draws {
            let v = rng.uniform_int(6);
            assert!(v <= 6);
            counts[v as usize] += 1;
        }
        let stat = chi_square(&counts, draws as f64 / 7.0);
        // 6 degrees of freedom, p = 0.0005
        assert!(stat < 24.1, "chi-square {stat} for counts {counts:?}");
    }

    #[test]
    fn permutation_contains_every_index_once() {
        let mut rng = MinStdRng::new(99);
        for n in [0usize, 1, 2, 5, 17] {
            let mut perm = rng.permutation(n);
            perm.sort_unstable();
            assert_eq!(perm, (0..n as u32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn permutation_of_four_is_uniform_over_cell_seeds() {
        let mut counts = [0u64; 24];
        let mut trials = 0u64;
        for x in 0..240 {
            for y in 0..200 {
                let seed = combine(hash_cell(CellKey::new(x, y, 3)), 0);
                let mut rng = MinStdRng::new(seed);
                let mut perm = [0u32; 4];
                rng.permute_into(&mut perm);
                counts[lehmer_code(&perm)] += 1;
                trials += 1;
            }
        }
        let stat = chi_square(&counts, trials as f64 / 24.0);
        // 23 degrees of freedom, p = 0.0001
        assert!(stat < 56.0, "chi-square {stat} for counts {counts:?}");
    }

    #[test]
    fn same_state_gives_same_stream() {
        let mut a = MinStdRng::new(123_456);
        let mut b = MinStdRng::new(123_456);
        assert_eq!(a.permutation(4), b.permutation(4));
        assert_eq!(a.canonical(), b.canonical());
    }

    // Rank of a permutation of 0..4 in lexicographic order.
    fn lehmer_code(perm: &[u32; 4]) -> usize {
        let mut rank = 0;
        for i in 0..4 {
            let smaller = perm[i + 1..].iter().filter(|&&v| v < perm[i]).count();
            rank = rank * (4 - i) + smaller;
        }
        rank
    }
}
