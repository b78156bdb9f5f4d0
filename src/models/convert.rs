use std::fmt;

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Absolute http(s) URL of the PDF to convert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PdfSource(Url);

impl PdfSource {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for PdfSource {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let url = Url::parse(&value).map_err(|e| format!("invalid URL '{}': {}", value, e))?;
        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(PdfSource(url)),
            "http" | "https" => Err(format!("invalid URL '{}': missing host", value)),
            scheme => Err(format!("invalid URL '{}': unsupported scheme '{}'", value, scheme)),
        }
    }
}

impl From<PdfSource> for String {
    fn from(source: PdfSource) -> Self {
        source.0.into()
    }
}

impl fmt::Display for PdfSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertPdfDto {
    pub url: PdfSource,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertPdfResultDto {
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
    pub detail: String,
}
