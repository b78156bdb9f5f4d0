use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootDto {
    pub version: &'static str,
    pub name: &'static str,
    #[serde(rename = "_links")]
    pub _links: RootLinks,
}

#[derive(Debug, Serialize)]
pub struct RootLinks {
    pub convert: &'static str,
}
