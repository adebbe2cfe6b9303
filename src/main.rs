use std::process::exit;

use anyhow::Error;
use clap::{App, Arg, ArgMatches};
use colorful::Color;
use colorful::Colorful;
use serde::Serialize;

use yt_wrapper::{fetch::FetchConfig, DownloadLink, Video, YouTubeError};

fn done(log: &str) {
    println!("{} {}", "[+]".color(Color::Green), log.color(Color::Green))
}

fn fail(log: &str) {
    println!("{} {}", "[!]".color(Color::Red), log.color(Color::Red))
}

fn pending(log: &str) {
    println!(
        "{} {}",
        "[-]".color(Color::Yellow),
        log.color(Color::Yellow)
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    title: String,
    author: String,
    description: String,
    thumbnail: String,
    view_count: String,
    video_id: String,
    download_links: Vec<DownloadLink>,
}

#[derive(Serialize)]
struct ErrorReport {
    message: String,
    code: Option<u32>,
    kind: &'static str,
}

impl From<&YouTubeError> for ErrorReport {
    fn from(err: &YouTubeError) -> Self {
        ErrorReport {
            message: err.to_string(),
            code: err.code(),
            kind: err.kind(),
        }
    }
}

#[tokio::main]
pub async fn main() -> Result<(), Error> {
    let matches = App::new("yt-wrapper")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about(clap::crate_description!())
        .arg(
            Arg::with_name("link")
                .long("link")
                .short("l")
                .takes_value(true)
                .required(true)
                .value_name("URL")
                .help("The YouTube video link, i.e. https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .short("j")
                .help("Prints the result as JSON."),
        )
        .arg(
            Arg::with_name("no_links")
                .long("no-links")
                .help("Only fetches the video information, skips the download links."),
        )
        .arg(
            Arg::with_name("feed")
                .long("feed")
                .takes_value(true)
                .value_name("URL")
                .help("Overrides the metadata feed endpoint."),
        )
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .help("Logs every request and decoded link."),
        )
        .get_matches();

    let default_filter = if matches.is_present("verbose") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let json = matches.is_present("json");
    match run(&matches).await {
        Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
        Ok(report) => print_report(&report),
        Err(err) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&ErrorReport::from(&err))?);
            } else {
                fail(format!("Whoa there! {}", err).as_str());
            }
            log::debug!("lookup failed with {}", err.kind());
            exit(1);
        }
    }
    Ok(())
}

async fn run(matches: &ArgMatches<'_>) -> Result<Report, YouTubeError> {
    let mut config = FetchConfig::default();
    if let Some(feed) = matches.value_of("feed") {
        config = config.with_feed_base(feed);
    }
    // `link` is required, clap exits before we get here without it
    let link = matches.value_of("link").unwrap_or_default();
    if !matches.is_present("json") {
        pending(format!("Fetching video information for {}", link).as_str());
    }
    let video = Video::from_config(link, &config).await?;
    let download_links = if matches.is_present("no_links") {
        Vec::new()
    } else {
        video.download_links().await?
    };
    Ok(Report {
        title: video.title().to_string(),
        author: video.uploader().to_string(),
        description: video.description().to_string(),
        thumbnail: video.thumbnail().to_string(),
        view_count: video.view_count().to_string(),
        video_id: video.video_id().to_string(),
        download_links,
    })
}

fn print_report(report: &Report) {
    done(format!("Found video \"{}\" by {}.", report.title, report.author).as_str());
    println!("{}: {}", "Title".bold(), report.title);
    println!("{}: {}", "Description".bold(), report.description);
    println!("{}: {}", "View Count".bold(), report.view_count);
    println!("{}: {}", "Thumbnail".bold(), report.thumbnail);
    println!("{}: {}", "Video ID".bold(), report.video_id);
    if report.download_links.is_empty() {
        return;
    }
    println!();
    for (index, link) in report.download_links.iter().enumerate() {
        println!(
            "{}. Quality: {}, {}",
            index + 1,
            link.quality,
            link.format.as_str().color(Color::Yellow)
        );
        println!("   {}", link.link);
    }
}
