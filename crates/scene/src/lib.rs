pub mod collection;
pub mod filter;
pub mod record;
pub mod selection;

pub use collection::*;
pub use filter::*;
pub use record::*;
pub use selection::*;
