use std::collections::BTreeMap;

/// Identifies the input an edge belongs to (a layer or a single polygon).
pub type Tag = u32;

/// Wrap counts per tag at one point of the plane.
///
/// Crossing an upward edge from left to right adds one, crossing a downward
/// edge subtracts one, so clockwise contours have a wrap count of +1 inside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapCounts {
    counts: BTreeMap<Tag, i32>,
}

impl WrapCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap count of one tag.
    #[must_use]
    pub fn get(&self, tag: Tag) -> i32 {
        self.counts.get(&tag).copied().unwrap_or(0)
    }

    /// Adds `delta` to the wrap count of `tag`.
    pub fn add(&mut self, tag: Tag, delta: i32) {
        let count = self.counts.entry(tag).or_insert(0);
        *count += delta;
        if *count == 0 {
            self.counts.remove(&tag);
        }
    }

    /// Applies a list of per-tag contributions.
    pub fn apply(&mut self, contributions: &[(Tag, i32)]) {
        for &(tag, delta) in contributions {
            self.add(tag, delta);
        }
    }

    /// Sum over all tags.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.counts.values().sum()
    }

    /// Number of tags with a nonzero wrap count.
    #[must_use]
    pub fn covered(&self) -> usize {
        self.counts.len()
    }
}

/// Decides from the wrap counts whether a point belongs to the result.
pub trait InsideTest {
    fn is_inside(&self, wc: &WrapCounts) -> bool;
}

/// Inside rule applied to the total wrap count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindingRule {
    /// Any nonzero wrap count.
    #[default]
    NonZero,
    /// Wrap count greater than zero (clockwise coverage only).
    Positive,
    /// Wrap count less than zero (counter-clockwise coverage only).
    Negative,
    /// Odd wrap count.
    EvenOdd,
}

impl WindingRule {
    /// Applies the rule to a single wrap count.
    #[must_use]
    pub fn test(self, wc: i32) -> bool {
        match self {
            Self::NonZero => wc != 0,
            Self::Positive => wc > 0,
            Self::Negative => wc < 0,
            Self::EvenOdd => wc % 2 != 0,
        }
    }
}

impl InsideTest for WindingRule {
    fn is_inside(&self, wc: &WrapCounts) -> bool {
        self.test(wc.total())
    }
}

/// Inside where more than `min_count` tags are covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageCount {
    pub min_count: usize,
}

impl InsideTest for CoverageCount {
    fn is_inside(&self, wc: &WrapCounts) -> bool {
        wc.covered() > self.min_count
    }
}
