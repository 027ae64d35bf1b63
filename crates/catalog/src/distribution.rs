use rand::Rng;

use crate::query::sanitize_average;

/// Stochastic rounding of a real-valued average into integer counts.
///
/// Each sample is `whole + 1` with probability `frac` and `whole` otherwise, so the
/// mean over many samples converges to the average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionalCount {
    whole: u32,
    frac: f64,
}

impl FractionalCount {
    pub fn new(avg: f64) -> Self {
        let avg = sanitize_average(avg);
        let whole = avg.floor();
        Self {
            whole: whole as u32,
            frac: avg - whole,
        }
    }

    pub fn whole(&self) -> u32 {
        self.whole
    }

    pub fn frac(&self) -> f64 {
        self.frac
    }

    /// Draw one count.
    ///
    /// Exactly one value is consumed from `rng` even when `frac` is zero, keeping
    /// the stream position independent of the average.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let u: f64 = rng.random();
        if u < self.frac {
            self.whole + 1
        } else {
            self.whole
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mean_of(avg: f64, samples: usize) -> f64 {
        let count = FractionalCount::new(avg);
        let mut rng = StdRng::seed_from_u64(7);
        let total: u64 = (0..samples).map(|_| u64::from(count.sample(&mut rng))).sum();
        total as f64 / samples as f64
    }

    #[test]
    fn splits_whole_and_fraction() {
        let count = FractionalCount::new(3.5);
        assert_eq!(count.whole(), 3);
        assert!((count.frac() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn converges_to_average() {
        assert!((mean_of(3.5, 10_000) - 3.5).abs() < 0.1);
        assert!((mean_of(2.7, 10_000) - 2.7).abs() < 0.1);
        assert!((mean_of(0.2, 10_000) - 0.2).abs() < 0.1);
    }

    #[test]
    fn zero_average_is_always_zero() {
        let count = FractionalCount::new(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..1_000).all(|_| count.sample(&mut rng) == 0));
    }

    #[test]
    fn integral_average_is_exact() {
        let count = FractionalCount::new(5.0);
        let mut rng = StdRng::seed_from_u64(2);
        assert!((0..1_000).all(|_| count.sample(&mut rng) == 5));
    }

    #[test]
    fn samples_stay_adjacent_to_average() {
        let count = FractionalCount::new(2.7);
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..1_000).all(|_| matches!(count.sample(&mut rng), 2 | 3)));
    }

    #[test]
    fn negative_average_is_zero() {
        let count = FractionalCount::new(-4.2);
        assert_eq!(count.whole(), 0);
        assert_eq!(count.frac(), 0.0);
    }
}
