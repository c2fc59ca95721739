pub mod dataset;
pub mod timestamp;

pub use dataset::*;
pub use timestamp::*;
