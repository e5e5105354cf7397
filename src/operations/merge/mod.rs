mod simple;
mod threshold;

pub use simple::SimpleMerge;
pub use threshold::Merge;
