use thiserror::Error;

/// Every way a lookup can fail. All of them abort the operation in progress.
#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("Invalid YouTube video URL specified")]
    InvalidUrl,
    #[error("{0}")]
    Fetch(String),
    #[error("Unable to parse metadata XML")]
    MetadataXml,
    #[error("Invalid XML returned from YouTube. Check if the YouTube link is valid")]
    FeedError,
    #[error("Unable to scrape YouTube video source. Make sure YouTube URL is valid")]
    Scrape,
}

impl YouTubeError {
    /// Stable discriminator used at the presentation boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            YouTubeError::InvalidUrl => "invalid_url",
            YouTubeError::Fetch(_) => "fetch_failure",
            YouTubeError::MetadataXml => "metadata_unparsable",
            YouTubeError::FeedError => "metadata_feed_error",
            YouTubeError::Scrape => "scrape_failure",
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            YouTubeError::InvalidUrl => Some(1),
            YouTubeError::MetadataXml => Some(2),
            YouTubeError::Scrape => Some(3),
            YouTubeError::Fetch(_) | YouTubeError::FeedError => None,
        }
    }
}

impl From<reqwest::Error> for YouTubeError {
    fn from(err: reqwest::Error) -> Self {
        YouTubeError::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, YouTubeError>;
