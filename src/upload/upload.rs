use std::time::Duration;

use base64::{engine::general_purpose, Engine};
use tracing::{error, info};

use crate::{error::ConvertError, models::ImgbbResponse};

#[async_trait::async_trait]
pub trait IUploadService: Send + Sync {
    /// Hosts one PNG and returns its public URL.
    async fn upload_image(&self, image: &[u8]) -> Result<String, ConvertError>;
}

pub struct ImgbbUploadService {
    pub client: reqwest::Client,
    pub api_key: String,
    pub upload_uri: String,
}

impl ImgbbUploadService {
    pub fn build(api_key: String, upload_uri: String, timeout: Duration) -> Result<Self, &'static str> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|_| "Could not build upload client.")?;
        Ok(ImgbbUploadService { client, api_key, upload_uri })
    }
}

#[async_trait::async_trait]
impl IUploadService for ImgbbUploadService {
    #[tracing::instrument(skip(self, image), fields(size = image.len()))]
    async fn upload_image(&self, image: &[u8]) -> Result<String, ConvertError> {
        let encoded_image = general_purpose::STANDARD.encode(image);
        let response = self
            .client
            .post(&self.upload_uri)
            .form(&[("key", self.api_key.as_str()), ("image", encoded_image.as_str())])
            .send()
            .await
            .map_err(upload_error)?;

        let status = response.status();
        let body = response.text().await.map_err(upload_error)?;
        match serde_json::from_str::<ImgbbResponse>(&body).ok().and_then(ImgbbResponse::into_url) {
            Some(url) => {
                info!("Uploaded image to {}", url);
                Ok(url)
            }
            None => {
                error!("Error uploading image: {} {}", status, body);
                Err(ConvertError::Upload(format!("No image URL in response with status {}", status)))
            }
        }
    }
}

fn upload_error(err: reqwest::Error) -> ConvertError {
    error!("Error uploading image to Imgbb: {}", err);
    ConvertError::Upload(err.to_string())
}
