use std::sync::Arc;

use futures::{StreamExt, TryStreamExt};
use tracing::{error, info};

use crate::{download::IDownloadService, error::ConvertError, models::PdfSource, upload::IUploadService};

use super::rasterize::IRasterizeService;

#[async_trait::async_trait]
pub trait IConvertService: Send + Sync {
    /// Downloads, rasterizes and hosts a PDF, returning one URL per page in page order.
    async fn convert_pdf(&self, source: &PdfSource) -> Result<Vec<String>, ConvertError>;
}

pub struct ConvertService {
    pub download_service: Arc<dyn IDownloadService>,
    pub rasterize_service: Arc<dyn IRasterizeService>,
    pub upload_service: Arc<dyn IUploadService>,
    pub upload_parallelism: Option<usize>,
}

#[async_trait::async_trait]
impl IConvertService for ConvertService {
    #[tracing::instrument(skip(self, source), fields(url = %source))]
    async fn convert_pdf(&self, source: &PdfSource) -> Result<Vec<String>, ConvertError> {
        info!("Starting conversion");
        let result = self.process(source).await;
        match &result {
            Ok(images) => info!("Finished conversion with {} images", images.len()),
            Err(err) => error!(status = %err.status(), "Finished conversion with error {}: {:?}", err, err),
        }
        result
    }
}

impl ConvertService {
    async fn process(&self, source: &PdfSource) -> Result<Vec<String>, ConvertError> {
        let pdf = self.download_service.download_pdf(source).await?;
        info!("Downloaded PDF with {} bytes", pdf.len());

        let images = self.rasterize_service.rasterize(pdf).await?;
        info!("Rendered {} pages", images.len());

        let urls = self.upload_images(images).await?;
        if urls.is_empty() {
            return Err(ConvertError::NoImages);
        }
        Ok(urls)
    }

    /// Uploads concurrently and restores page order afterwards. The first
    /// failure drops the stream, cancelling the uploads still in flight.
    async fn upload_images(&self, images: Vec<Vec<u8>>) -> Result<Vec<String>, ConvertError> {
        let parallelism = self.upload_parallelism.unwrap_or(images.len()).max(1);
        let uploads: Vec<_> = images
            .into_iter()
            .enumerate()
            .map(|(index, image)| {
                let upload_service = self.upload_service.clone();
                async move { upload_service.upload_image(&image).await.map(|url| (index, url)) }
            })
            .collect();
        let mut urls: Vec<(usize, String)> = futures::stream::iter(uploads).buffer_unordered(parallelism).try_collect().await?;
        urls.sort_unstable_by_key(|(index, _)| *index);
        Ok(urls.into_iter().map(|(_, url)| url).collect())
    }
}
