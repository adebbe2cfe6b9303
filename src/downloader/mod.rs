use serde::Serialize;

use crate::error::Result;

pub mod fmt_map;

/// One rendition of the video, ready to hand to a user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DownloadLink {
    pub link: String,
    pub quality: String,
    pub format: String,
}

/// Turns a watch page into download links.
pub trait Extractor {
    fn extract_links(&self, page_markup: &str, title: &str) -> Result<Vec<DownloadLink>>;
}
