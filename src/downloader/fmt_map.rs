use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::{
    downloader::{DownloadLink, Extractor},
    error::{Result, YouTubeError},
};

lazy_static! {
    static ref STREAM_MAP: Regex =
        Regex::new(r#""url_encoded_fmt_stream_map": "url=(.+?)itag=\d{1,3}","#).unwrap();
    static ref FORMAT: Regex = Regex::new(r#"video/([A-Za-z0-9_-]{1,6})"#).unwrap();
    static ref QUALITY_TAIL: Regex = Regex::new(r#"&quality=.+"#).unwrap();
    static ref ITAG: Regex = Regex::new(r#"itag=([0-9]{1,2})"#).unwrap();
    static ref IPV4: Regex =
        Regex::new(r#"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}"#).unwrap();
}

/// Host address links are rewritten to before they are shown.
const REDACTED_HOST: &str = "127.0.0.1";

/// Scrapes the `url_encoded_fmt_stream_map` blob embedded in the watch page.
#[derive(Clone, Copy, Debug, Default)]
pub struct StreamMapExtractor;

impl Extractor for StreamMapExtractor {
    fn extract_links(&self, page_markup: &str, title: &str) -> Result<Vec<DownloadLink>> {
        let blob = STREAM_MAP
            .captures(page_markup)
            .and_then(|capture| capture.get(1))
            .ok_or(YouTubeError::Scrape)?
            .as_str();
        let links: Vec<DownloadLink> = blob
            .split(',')
            .map(|fragment| clean_fragment(&fragment.replace("url=", ""), title))
            .collect();
        info!("Extracted {} download links.", links.len());
        Ok(links)
    }
}

/// The page escapes ampersands twice: once as `\u0026` and once as `%26`.
fn decode_url(url: &str) -> String {
    let url = url.replace(r"\u0026", "&").replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(url.as_bytes())).into_owned()
}

fn clean_fragment(fragment: &str, title: &str) -> DownloadLink {
    let url = decode_url(fragment);
    debug!("decoded fragment {}", url);

    // the mime type sits behind &quality=, read it before truncating
    let format = FORMAT
        .captures(&url)
        .and_then(|capture| capture.get(1))
        .map_or(String::from("Unknown"), |format| {
            format.as_str().replace("x-flv", "flv")
        });
    let url = QUALITY_TAIL.replace_all(&url, "");
    let quality = ITAG
        .captures(&url)
        .and_then(|capture| capture.get(1))
        .map_or(String::new(), |quality| quality.as_str().to_string());
    let url = IPV4.replace_all(&url, REDACTED_HOST);

    DownloadLink {
        link: format!("{}&title={}", url, title),
        quality,
        format,
    }
}
