use log::{debug, info};
use roxmltree::{Document, Node};

use crate::error::{Result, YouTubeError};
use crate::fetch::Fetch;

/// The fourth thumbnail entry is the one reported.
const THUMBNAIL_INDEX: usize = 3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub description: String,
    pub thumbnail: String,
    pub viewcount: String,
}

impl Metadata {
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("title", self.title.as_str()),
            ("author", self.author.as_str()),
            ("description", self.description.as_str()),
            ("thumbnail", self.thumbnail.as_str()),
            ("viewcount", self.viewcount.as_str()),
        ]
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

pub fn feed_url(feed_base: &str, video_id: &str) -> String {
    format!("{}/{}?v=2", feed_base, video_id)
}

pub async fn fetch_metadata<F: Fetch + ?Sized>(
    fetcher: &F,
    feed_base: &str,
    video_id: &str,
) -> Result<Metadata> {
    let source = fetcher.fetch_source(&feed_url(feed_base, video_id)).await?;
    let metadata = parse_feed(&source)?;
    info!("Loaded metadata for \"{}\".", metadata.title);
    Ok(metadata)
}

/// Reads a single-video feed entry. Missing nodes leave their field empty.
pub fn parse_feed(source: &str) -> Result<Metadata> {
    let document = Document::parse(source).map_err(|err| {
        debug!("feed is not well-formed: {}", err);
        YouTubeError::MetadataXml
    })?;
    let root = document.root_element();
    if root
        .children()
        .any(|node| node.is_element() && node.tag_name().name() == "error")
    {
        Err(YouTubeError::FeedError)?
    }

    let atom = root.tag_name().namespace();
    let group = root
        .lookup_namespace_uri(Some("media"))
        .and_then(|media| child(root, Some(media), "group").map(|group| (media, group)));
    let statistics = root
        .lookup_namespace_uri(Some("yt"))
        .and_then(|yt| child(root, Some(yt), "statistics"));

    Ok(Metadata {
        title: text(child(root, atom, "title")),
        author: text(child(root, atom, "author").and_then(|author| child(author, atom, "name"))),
        description: text(group.and_then(|(media, group)| child(group, Some(media), "description"))),
        thumbnail: group
            .and_then(|(media, group)| {
                children(group, Some(media), "thumbnail").nth(THUMBNAIL_INDEX)
            })
            .and_then(|thumbnail| thumbnail.attribute("url"))
            .unwrap_or_default()
            .to_string(),
        viewcount: statistics
            .and_then(|statistics| statistics.attribute("viewCount"))
            .unwrap_or_default()
            .to_string(),
    })
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    namespace: Option<&'a str>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| {
        c.is_element() && c.tag_name().name() == name && c.tag_name().namespace() == namespace
    })
}

fn child<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    namespace: Option<&'a str>,
    name: &'a str,
) -> Option<Node<'a, 'input>> {
    children(node, namespace, name).next()
}

/// All direct text children, comments and nested elements skipped.
fn text(node: Option<Node>) -> String {
    node.map_or(String::new(), |node| {
        node.children()
            .filter(|part| part.is_text())
            .filter_map(|part| part.text())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;

    const FEED: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<entry xmlns='http://www.w3.org/2005/Atom' xmlns:media='http://search.yahoo.com/mrss/' xmlns:yt='http://gdata.youtube.com/schemas/2007'>
  <title>Never Gonna Give You Up</title>
  <author><name>RickAstleyVEVO</name><uri>https://gdata.youtube.com/feeds/api/users/RickAstleyVEVO</uri></author>
  <media:group>
    <media:description type='plain'>Music video by Rick Astley.</media:description>
    <media:thumbnail url='https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg' height='90' width='120'/>
    <media:thumbnail url='https://i.ytimg.com/vi/dQw4w9WgXcQ/mqdefault.jpg' height='180' width='320'/>
    <media:thumbnail url='https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg' height='360' width='480'/>
    <media:thumbnail url='https://i.ytimg.com/vi/dQw4w9WgXcQ/1.jpg' height='90' width='120'/>
    <media:thumbnail url='https://i.ytimg.com/vi/dQw4w9WgXcQ/2.jpg' height='90' width='120'/>
  </media:group>
  <yt:statistics favoriteCount='0' viewCount='123456789'/>
</entry>"#;

    #[test]
    fn parses_every_field() {
        let metadata = parse_feed(FEED).unwrap();
        assert_eq!(
            metadata,
            Metadata {
                title: "Never Gonna Give You Up".into(),
                author: "RickAstleyVEVO".into(),
                description: "Music video by Rick Astley.".into(),
                thumbnail: "https://i.ytimg.com/vi/dQw4w9WgXcQ/1.jpg".into(),
                viewcount: "123456789".into(),
            }
        );
    }

    #[test]
    fn missing_nodes_become_empty() {
        let feed = r#"<entry xmlns='http://www.w3.org/2005/Atom' xmlns:media='http://search.yahoo.com/mrss/'>
  <title>Short</title>
  <media:group>
    <media:thumbnail url='a'/><media:thumbnail url='b'/>
  </media:group>
</entry>"#;
        let metadata = parse_feed(feed).unwrap();
        assert_eq!(metadata.title, "Short");
        assert_eq!(metadata.author, "");
        assert_eq!(metadata.description, "");
        assert_eq!(metadata.thumbnail, "");
        assert_eq!(metadata.viewcount, "");
    }

    #[test]
    fn text_is_joined_across_comments() {
        let feed = "<entry><title>Never <!-- split -->Gonna<b>x</b> Give</title></entry>";
        let metadata = parse_feed(feed).unwrap();
        assert_eq!(metadata.title, "Never Gonna Give");
    }

    #[test]
    fn undeclared_prefixes_are_not_guessed() {
        let feed = "<entry><title>t</title><group><description>d</description></group></entry>";
        let metadata = parse_feed(feed).unwrap();
        assert_eq!(metadata.title, "t");
        assert_eq!(metadata.description, "");
    }

    #[test]
    fn error_node_is_a_feed_error() {
        let feed = "<errors><error><domain>GData</domain><code>InvalidRequestUriException</code></error></errors>";
        assert!(matches!(parse_feed(feed), Err(YouTubeError::FeedError)));
    }

    #[test]
    fn malformed_xml_is_unparsable() {
        assert!(matches!(
            parse_feed("<entry><title>oops</entry>"),
            Err(YouTubeError::MetadataXml)
        ));
        assert!(matches!(
            parse_feed("Invalid id"),
            Err(YouTubeError::MetadataXml)
        ));
    }

    #[test]
    fn entries_keep_fixed_keys() {
        let metadata = parse_feed(FEED).unwrap();
        let keys: Vec<&str> = metadata.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["title", "author", "description", "thumbnail", "viewcount"]);
        assert_eq!(metadata.get("viewcount"), Some("123456789"));
        assert_eq!(metadata.get("rating"), None);
    }

    #[tokio::test]
    async fn fetches_the_versioned_feed() {
        let fetcher = StaticFetcher::default().with("http://feed/dQw4w9WgXcQ?v=2", FEED);
        let metadata = fetch_metadata(&fetcher, "http://feed", "dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(metadata.author, "RickAstleyVEVO");
        assert_eq!(fetcher.calls(), 1);
    }
}
