//! Looks up a YouTube video's feed metadata and scrapes its direct download links.

pub mod downloader;
pub mod error;
pub mod fetch;
pub mod metadata;
pub mod youtube;

pub use downloader::DownloadLink;
pub use error::YouTubeError;
pub use metadata::Metadata;
pub use youtube::{is_valid_url, video_id, Video};
