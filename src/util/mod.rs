pub mod consts;
pub mod mime;
pub mod settings;
