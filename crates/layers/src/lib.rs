pub mod cluster;
pub mod symbology;

pub use cluster::*;
