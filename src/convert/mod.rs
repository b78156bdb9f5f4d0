mod convert;
pub use convert::*;

pub mod rasterize;
