use serde::Deserialize;

/// Subset of the imgbb upload response that carries the hosted URL.
#[derive(Debug, Deserialize)]
pub struct ImgbbResponse {
    pub data: Option<ImgbbData>,
}

#[derive(Debug, Deserialize)]
pub struct ImgbbData {
    pub url: Option<String>,
}

impl ImgbbResponse {
    pub fn into_url(self) -> Option<String> {
        self.data.and_then(|data| data.url)
    }
}
