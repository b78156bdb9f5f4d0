use reqwest::header::{HeaderMap, CONTENT_TYPE};

pub fn get_content_type(headers: &HeaderMap) -> &str {
    headers.get(CONTENT_TYPE).and_then(|content_type| content_type.to_str().ok()).unwrap_or("")
}

/// Loose check on a declared media type: anything mentioning "pdf" counts.
pub fn is_pdf(content_type: &str) -> bool {
    content_type.to_lowercase().contains("pdf")
}
