use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{
    downloader::{fmt_map::StreamMapExtractor, DownloadLink, Extractor},
    error::{Result, YouTubeError},
    fetch::{Fetch, FetchConfig, HttpFetcher},
    metadata::{fetch_metadata, Metadata},
};

lazy_static! {
    // unanchored, trailing garbage after the id still validates
    static ref WATCH_URL: Regex =
        Regex::new(r#"https://www\.youtube\.com/watch\?v=[A-Za-z0-9_-]{11}"#).unwrap();
    static ref VIDEO_ID: Regex = Regex::new(r#"\?v=(.{11})"#).unwrap();
}

pub fn is_valid_url(url: &str) -> bool {
    WATCH_URL.is_match(url)
}

/// The eleven characters after `?v=`, or an empty string when there are none.
pub fn video_id(url: &str) -> String {
    VIDEO_ID
        .captures(url)
        .and_then(|capture| capture.get(1))
        .map_or(String::new(), |id| id.as_str().to_string())
}

/// A single watch page whose metadata has already been loaded.
pub struct Video<F = HttpFetcher, E = StreamMapExtractor> {
    url: String,
    video_id: String,
    metadata: Metadata,
    fetcher: F,
    extractor: E,
}

impl Video {
    pub async fn new(url: &str) -> Result<Video> {
        Video::from_config(url, &FetchConfig::default()).await
    }

    pub async fn from_config(url: &str, config: &FetchConfig) -> Result<Video> {
        Video::with_parts(
            url,
            HttpFetcher::new(config)?,
            StreamMapExtractor,
            &config.feed_base,
        )
        .await
    }
}

impl<F: Fetch, E: Extractor> Video<F, E> {
    pub async fn with_parts(
        url: &str,
        fetcher: F,
        extractor: E,
        feed_base: &str,
    ) -> Result<Video<F, E>> {
        if !is_valid_url(url) {
            Err(YouTubeError::InvalidUrl)?
        }
        let video_id = video_id(url);
        debug!("resolved video id \"{}\"", video_id);
        let metadata = fetch_metadata(&fetcher, feed_base, &video_id).await?;
        Ok(Video {
            url: url.to_string(),
            video_id,
            metadata,
            fetcher,
            extractor,
        })
    }

    /// Fetches the watch page again on every call.
    pub async fn download_links(&self) -> Result<Vec<DownloadLink>> {
        let source = self.fetcher.fetch_source(&self.url).await?;
        self.extractor.extract_links(&source, self.title())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn author(&self) -> &str {
        &self.metadata.author
    }

    pub fn uploader(&self) -> &str {
        self.author()
    }

    pub fn description(&self) -> &str {
        &self.metadata.description
    }

    pub fn thumbnail(&self) -> &str {
        &self.metadata.thumbnail
    }

    pub fn view_count(&self) -> &str {
        &self.metadata.viewcount
    }
}
