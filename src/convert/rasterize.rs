use bytes::Bytes;
use image::ImageFormat;
use pdfium_render::{prelude::Pdfium, render_config::PdfRenderConfig};
use std::{io::Cursor, sync::Arc};
use tracing::{debug, error};

use crate::error::ConvertError;

#[cfg(feature = "static")]
pub fn init_pdfium(_path: &str) -> Result<Pdfium, &'static str> {
    Ok(Pdfium::new(Pdfium::bind_to_statically_linked_library().map_err(|_| "Could not init pdfium")?))
}

#[cfg(not(feature = "static"))]
pub fn init_pdfium(path: &str) -> Result<Pdfium, &'static str> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(path))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|_| "Could not init pdfium")?;
    Ok(Pdfium::new(bindings))
}

#[async_trait::async_trait]
pub trait IRasterizeService: Send + Sync {
    /// Renders every page to PNG, in document order.
    async fn rasterize(&self, pdf: Bytes) -> Result<Vec<Vec<u8>>, ConvertError>;
}

pub struct RasterizeService {
    pub pdfium: Arc<Pdfium>,
    pub scale: f32,
}

#[async_trait::async_trait]
impl IRasterizeService for RasterizeService {
    #[tracing::instrument(skip(self, pdf), fields(size = pdf.len()))]
    async fn rasterize(&self, pdf: Bytes) -> Result<Vec<Vec<u8>>, ConvertError> {
        let pdfium = self.pdfium.clone();
        let scale = self.scale;
        let result = tokio::task::spawn_blocking(move || render_pages(&pdfium, pdf.to_vec(), scale))
            .await
            .map_err(|e| ConvertError::Internal(format!("Render task failed: {}", e)))?;
        if let Err(err) = &result {
            error!("Error converting PDF to images: {:?}", err);
        }
        result
    }
}

fn render_pages(pdfium: &Pdfium, source_file: Vec<u8>, scale: f32) -> Result<Vec<Vec<u8>>, ConvertError> {
    let document = pdfium
        .load_pdf_from_byte_vec(source_file, None)
        .map_err(|e| ConvertError::Render(format!("Could not open document: {:?}", e)))?;

    let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);
    document
        .pages()
        .iter()
        .enumerate()
        .map(|(index, page)| -> Result<Vec<u8>, ConvertError> {
            let mut bytes: Vec<u8> = Vec::new();
            page.render_with_config(&render_config)
                .map_err(|e| ConvertError::Render(format!("Could not render page {}: {:?}", index + 1, e)))?
                .as_image()
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(|e| ConvertError::Render(format!("Could not encode page {}: {}", index + 1, e)))?;
            debug!(page = index + 1, size = bytes.len(), "Rendered page");
            Ok(bytes)
        })
        .collect()
}
