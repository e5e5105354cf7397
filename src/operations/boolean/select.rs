use crate::operations::sweep::{InsideTest, Tag, WrapCounts};

/// Tag of the edges of input A.
pub const TAG_A: Tag = 0;
/// Tag of the edges of input B.
pub const TAG_B: Tag = 1;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanMode {
    Or,
    And,
    ANotB,
    BNotA,
    Xor,
}

impl BooleanMode {
    /// Decides whether a point belongs to the result, given whether it lies
    /// inside A and inside B.
    ///
    /// | in A | in B | Or | And | A NOT B | B NOT A | Xor |
    /// |------|------|----|-----|---------|---------|-----|
    /// | no   | no   | -  | -   | -       | -       | -   |
    /// | yes  | no   | x  | -   | x       | -       | x   |
    /// | no   | yes  | x  | -   | -       | x       | x   |
    /// | yes  | yes  | x  | x   | -       | -       | -   |
    #[must_use]
    pub fn selects(self, in_a: bool, in_b: bool) -> bool {
        match (self, in_a, in_b) {
            (Self::Or, a, b) => a || b,
            (Self::And, a, b) => a && b,
            (Self::ANotB, a, b) => a && !b,
            (Self::BNotA, a, b) => b && !a,
            (Self::Xor, a, b) => a != b,
        }
    }

    /// Text name as used by layout tools, e.g. `ANotB` prints as `A NOT B`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::ANotB => "A NOT B",
            Self::BNotA => "B NOT A",
            Self::Xor => "XOR",
        }
    }
}

impl InsideTest for BooleanMode {
    fn is_inside(&self, wc: &WrapCounts) -> bool {
        self.selects(wc.get(TAG_A) != 0, wc.get(TAG_B) != 0)
    }
}

/// The OR (union) mode.
#[must_use]
pub fn mode_or() -> BooleanMode {
    BooleanMode::Or
}

/// The AND (intersection) mode.
#[must_use]
pub fn mode_and() -> BooleanMode {
    BooleanMode::And
}

/// The A NOT B (difference) mode.
#[must_use]
pub fn mode_anotb() -> BooleanMode {
    BooleanMode::ANotB
}

/// The B NOT A (reverse difference) mode.
#[must_use]
pub fn mode_bnota() -> BooleanMode {
    BooleanMode::BNotA
}

/// The XOR (symmetric difference) mode.
#[must_use]
pub fn mode_xor() -> BooleanMode {
    BooleanMode::Xor
}
