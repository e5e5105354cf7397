pub mod boolean;
pub mod merge;
pub mod size;
pub mod sweep;

pub use boolean::{mode_and, mode_anotb, mode_bnota, mode_or, mode_xor, Boolean, BooleanMode};
pub use merge::{Merge, SimpleMerge};
pub use size::{Size, DEFAULT_SIZE_MODE};
pub use sweep::{CoverageCount, InsideTest, WindingRule, WrapCounts};
