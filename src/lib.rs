pub mod convert;
pub mod download;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod upload;
pub mod util;
