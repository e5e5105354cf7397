use std::cmp::Ordering;

/// Exact rational number with a positive denominator.
///
/// Used wherever the scanline needs to compare positions that do not lie on
/// the grid (edge x at a band's mid-height, crossing points).
#[derive(Debug, Clone, Copy)]
pub struct Frac {
    num: i128,
    den: i128,
}

impl Frac {
    /// Creates `num / den`. The denominator must be non-zero.
    #[must_use]
    pub fn new(num: i128, den: i128) -> Self {
        debug_assert!(den != 0, "zero denominator");
        if den < 0 {
            Self {
                num: -num,
                den: -den,
            }
        } else {
            Self { num, den }
        }
    }

    /// Creates an integral value.
    #[must_use]
    pub fn from_int(v: i128) -> Self {
        Self { num: v, den: 1 }
    }

    /// Returns `(numerator, denominator)`; the denominator is positive.
    #[must_use]
    pub fn parts(self) -> (i128, i128) {
        (self.num, self.den)
    }

    /// Rounds to the nearest integer, halves upwards.
    ///
    /// A value rounds to `k` exactly when it lies in `[k - 1/2, k + 1/2)`,
    /// which makes the unit squares around grid points a partition.
    #[must_use]
    pub fn round(self) -> i128 {
        (2 * self.num + self.den).div_euclid(2 * self.den)
    }
}

impl PartialEq for Frac {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frac {}

impl PartialOrd for Frac {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frac {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}
