mod convert;
pub use convert::*;

mod imgbb;
pub use imgbb::*;

mod root;
pub use root::*;
