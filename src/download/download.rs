use std::time::Duration;

use bytes::{Bytes, BytesMut};
use reqwest::StatusCode;
use tracing::{error, info};

use crate::{
    error::ConvertError,
    models::PdfSource,
    util::{
        consts::{MAX_PDF_SIZE, USER_AGENT},
        mime::{get_content_type, is_pdf},
    },
};

#[async_trait::async_trait]
pub trait IDownloadService: Send + Sync {
    async fn download_pdf(&self, source: &PdfSource) -> Result<Bytes, ConvertError>;
}

pub struct DownloadService {
    pub client: reqwest::Client,
    pub max_size: usize,
}

impl DownloadService {
    pub fn build(timeout: Duration) -> Result<Self, &'static str> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|_| "Could not build download client.")?;
        Ok(DownloadService { client, max_size: MAX_PDF_SIZE })
    }
}

#[async_trait::async_trait]
impl IDownloadService for DownloadService {
    #[tracing::instrument(skip(self, source), fields(url = %source))]
    async fn download_pdf(&self, source: &PdfSource) -> Result<Bytes, ConvertError> {
        let result = self.fetch(source).await;
        if let Err(err) = &result {
            error!("Could not download PDF: {} ({:?})", err, err);
        }
        result
    }
}

impl DownloadService {
    async fn fetch(&self, source: &PdfSource) -> Result<Bytes, ConvertError> {
        let mut response = self.client.get(source.as_str()).send().await.map_err(request_error)?;

        let status = response.status();
        info!("Response status: {}", status);
        info!("Response headers: {:?}", response.headers());
        if status != StatusCode::OK {
            return Err(ConvertError::RemoteFetch(format!("Failed to download PDF. Status code: {}", status.as_u16())));
        }

        let content_type = get_content_type(response.headers()).to_string();
        info!("Content-Type: {}", content_type);
        if !is_pdf(&content_type) {
            return Err(ConvertError::RemoteFetch(format!("URL does not point to a PDF file. Content-Type: {}", content_type)));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_size as u64 {
                return Err(too_large());
            }
        }
        let mut bytes = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(request_error)? {
            if bytes.len() + chunk.len() > self.max_size {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes.freeze())
    }
}

fn too_large() -> ConvertError {
    ConvertError::RemoteFetch("PDF file is too large.".to_string())
}

fn request_error(err: reqwest::Error) -> ConvertError {
    if err.is_builder() {
        ConvertError::Internal("Unexpected error occurred.".to_string())
    } else {
        ConvertError::Transport(err.to_string())
    }
}
