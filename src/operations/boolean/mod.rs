mod engine;
mod select;

pub use engine::Boolean;
pub use select::{mode_and, mode_anotb, mode_bnota, mode_or, mode_xor, BooleanMode, TAG_A, TAG_B};
