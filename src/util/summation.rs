//! Compensated floating-point summation
//!
//! Billions of `f64` additions drift noticeably when summed naively. The
//! accumulators in this crate carry a Neumaier compensation term alongside the
//! running sum, which recovers the low-order bits lost by each addition. The
//! result is at least as accurate as a naive `long double` loop.

/// Running sum with a Neumaier error-compensation term
///
/// # Example
///
/// ```
/// use sqrtsum::util::summation::CompensatedSum;
///
/// let mut sum = CompensatedSum::new();
/// for x in [1.0, 1e100, 1.0, -1e100] {
///     sum.add(x);
/// }
/// assert_eq!(sum.value(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    /// Create a new sum at zero
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            compensation: 0.0,
        }
    }

    /// Add one term
    #[inline(always)]
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// Fold another partial sum into this one
    pub fn merge(&mut self, other: &CompensatedSum) {
        self.add(other.sum);
        self.add(other.compensation);
    }

    /// Best estimate of the total
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_of(terms: impl IntoIterator<Item = f64>) -> CompensatedSum {
        let mut sum = CompensatedSum::new();
        for x in terms {
            sum.add(x);
        }
        sum
    }

    #[test]
    fn test_new_is_zero() {
        assert_eq!(CompensatedSum::new().value(), 0.0);
        assert_eq!(CompensatedSum::default(), CompensatedSum::new());
    }

    #[test]
    fn test_recovers_cancelled_terms() {
        let terms = [1.0, 1e100, 1.0, -1e100];

        let naive: f64 = terms.iter().sum();
        let compensated = sum_of(terms);

        assert_eq!(naive, 0.0);
        assert_eq!(compensated.value(), 2.0);
    }

    #[test]
    fn test_many_small_terms() {
        // 0.1 is not representable, so a naive loop drifts away from 1e6
        let mut sum = CompensatedSum::new();
        for _ in 0..10_000_000 {
            sum.add(0.1);
        }
        assert!((sum.value() - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let left = sum_of((1..=500).map(|i| (i as f64).sqrt()));
        let right = sum_of((501..=1000).map(|i| (i as f64).sqrt()));
        let whole = sum_of((1..=1000).map(|i| (i as f64).sqrt()));

        let mut merged = left;
        merged.merge(&right);

        let rel = (merged.value() - whole.value()).abs() / whole.value();
        assert!(rel < 1e-15, "relative difference {}", rel);
    }

    #[test]
    fn test_merge_into_empty_is_identity() {
        let part = sum_of((1..=1000).map(|i| (i as f64).sqrt()));

        let mut total = CompensatedSum::new();
        total.merge(&part);

        assert_eq!(total.value(), part.value());
    }
}
