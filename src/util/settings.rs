use std::{env, time::Duration};

use super::consts::IMGBB_UPLOAD_URI;

#[derive(Debug, Clone)]
pub struct Settings {
    pub imgbb_api_key: String,
    pub imgbb_upload_uri: String,
    pub port: u16,
    pub download_timeout: Duration,
    pub upload_timeout: Duration,
    pub request_timeout: Duration,
    /// Max concurrent uploads per request, `None` uploads every page at once.
    pub upload_parallelism: Option<usize>,
    pub render_scale: f32,
    pub pdfium_path: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, &'static str> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, &'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Settings {
            imgbb_api_key: get_api_key(&lookup)?,
            imgbb_upload_uri: lookup("IMGBB_UPLOAD_URI").unwrap_or_else(|| IMGBB_UPLOAD_URI.to_string()),
            port: get_port(&lookup),
            download_timeout: get_seconds(&lookup, "DOWNLOAD_TIMEOUT_SECONDS", 60),
            upload_timeout: get_seconds(&lookup, "UPLOAD_TIMEOUT_SECONDS", 60),
            request_timeout: get_seconds(&lookup, "REQUEST_TIMEOUT_SECONDS", 120),
            upload_parallelism: get_parallelism(&lookup),
            render_scale: get_render_scale(&lookup),
            pdfium_path: lookup("PDFIUM_PATH").unwrap_or_else(|| "./".to_string()),
        })
    }
}

fn get_api_key(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, &'static str> {
    match lookup("IMGBB_API_KEY") {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err("Imgbb API key not found in environment variables."),
    }
}

fn get_port(lookup: &impl Fn(&str) -> Option<String>) -> u16 {
    match lookup("PORT").map(|port| port.parse::<u16>()) {
        Some(Ok(port)) => port,
        _ => 8000,
    }
}

fn get_seconds(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u64) -> Duration {
    let seconds = match lookup(name).map(|seconds| seconds.parse::<u64>()) {
        Some(Ok(seconds)) if seconds > 0 => seconds,
        _ => default,
    };
    Duration::from_secs(seconds)
}

fn get_parallelism(lookup: &impl Fn(&str) -> Option<String>) -> Option<usize> {
    match lookup("UPLOAD_PARALLELISM").map(|parallelism| parallelism.parse::<usize>()) {
        Some(Ok(parallelism)) if parallelism > 0 => Some(parallelism),
        _ => None,
    }
}

fn get_render_scale(lookup: &impl Fn(&str) -> Option<String>) -> f32 {
    match lookup("RENDER_SCALE").map(|scale| scale.parse::<f32>()) {
        Some(Ok(scale)) if scale.is_finite() && scale > 0.0 => scale,
        _ => 1.0,
    }
}
