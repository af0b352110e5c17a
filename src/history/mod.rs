pub mod merge;
pub mod paginate;

pub use merge::{merge, MergeOutcome};
pub use paginate::page;
