pub static VERSION: &str = env!("CARGO_PKG_VERSION");
pub static NAME: &str = env!("CARGO_PKG_NAME");

/// Largest PDF accepted from a remote source, in bytes.
pub const MAX_PDF_SIZE: usize = 10 * 1024 * 1024;

/// Some hosts refuse requests without a browser-like agent.
pub const USER_AGENT: &str = "Mozilla/5.0";

pub const IMGBB_UPLOAD_URI: &str = "https://api.imgbb.com/1/upload";
