use std::sync::Arc;

use crate::{
    convert::{rasterize::{init_pdfium, RasterizeService}, ConvertService, IConvertService},
    download::DownloadService,
    upload::ImgbbUploadService,
    util::settings::Settings,
};

pub type Services = Arc<ServiceCollection>;

pub struct ServiceCollection {
    pub convert_service: Arc<dyn IConvertService>,
}

impl ServiceCollection {
    pub fn build(settings: &Settings) -> Result<Services, &'static str> {
        let pdfium = init_pdfium(&settings.pdfium_path)?;
        let download_service = Arc::new(DownloadService::build(settings.download_timeout)?);
        let rasterize_service = Arc::new(RasterizeService {
            pdfium: Arc::new(pdfium),
            scale: settings.render_scale,
        });
        let upload_service = Arc::new(ImgbbUploadService::build(
            settings.imgbb_api_key.clone(),
            settings.imgbb_upload_uri.clone(),
            settings.upload_timeout,
        )?);
        Ok(Arc::new(ServiceCollection {
            convert_service: Arc::new(ConvertService {
                download_service,
                rasterize_service,
                upload_service,
                upload_parallelism: settings.upload_parallelism,
            }),
        }))
    }
}
