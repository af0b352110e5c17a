use std::time::Duration;

use feed_rs::parser;
use reqwest::blocking::Client;

use crate::domain::RawEntry;
use crate::errors::{FeedlogError, FeedlogResult};
use crate::fetch::traits::FeedFetcher;

/// Blocking HTTP fetcher backed by feed-rs. Handles both RSS and Atom
/// transparently; the rest of the crate only sees `RawEntry` values.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn fetch_and_parse(&self, url: &str) -> FeedlogResult<feed_rs::model::Feed> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        Self::parse_bytes(&bytes)
    }

    fn parse_bytes(bytes: &[u8]) -> FeedlogResult<feed_rs::model::Feed> {
        parser::parse(bytes).map_err(|e| FeedlogError::FeedParse(e.to_string()))
    }

    fn entry_to_raw(entry: feed_rs::model::Entry) -> RawEntry {
        RawEntry {
            title: entry.title.map(|t| t.content),
            link: entry.links.into_iter().next().map(|l| l.href),
            summary: entry.summary.map(|s| s.content),
            description: entry.content.and_then(|c| c.body),
            published: entry
                .published
                .or(entry.updated)
                .map(|dt| dt.to_rfc3339()),
        }
    }

    /// Parse entries from raw feed bytes (used for testing)
    #[cfg(test)]
    fn entries_from_bytes(bytes: &[u8]) -> FeedlogResult<Vec<RawEntry>> {
        let parsed = Self::parse_bytes(bytes)?;
        Ok(parsed.entries.into_iter().map(Self::entry_to_raw).collect())
    }
}

impl FeedFetcher for HttpFetcher {
    fn fetch_title(&self, url: &str) -> FeedlogResult<Option<String>> {
        let feed = self.fetch_and_parse(url)?;
        Ok(feed
            .title
            .map(|t| t.content)
            .filter(|t| !t.trim().is_empty()))
    }

    fn fetch_entries(&self, url: &str) -> FeedlogResult<Vec<RawEntry>> {
        let feed = self.fetch_and_parse(url)?;
        Ok(feed.entries.into_iter().map(Self::entry_to_raw).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample RSS feed (based on Rust Blog format)
    const SAMPLE_RSS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Rust Blog</title>
    <link>https://blog.rust-lang.org/</link>
    <description>Empowering everyone to build reliable and efficient software.</description>
    <item>
      <title>Announcing Rust 1.75.0</title>
      <link>https://blog.rust-lang.org/2023/12/28/Rust-1.75.0.html</link>
      <description><![CDATA[<p>The Rust team is happy to announce a new version of Rust, 1.75.0.</p>]]></description>
      <pubDate>Thu, 28 Dec 2023 00:00:00 +0000</pubDate>
      <guid>https://blog.rust-lang.org/2023/12/28/Rust-1.75.0.html</guid>
    </item>
    <item>
      <link>https://blog.rust-lang.org/2024/01/10/Rust-2024-CFT.html</link>
      <description><![CDATA[<p>We're testing the next edition of Rust!</p>]]></description>
      <pubDate>Wed, 10 Jan 2024 00:00:00 +0000</pubDate>
      <guid>https://blog.rust-lang.org/2024/01/10/Rust-2024-CFT.html</guid>
    </item>
  </channel>
</rss>"#;

    // Sample Atom feed
    const SAMPLE_ATOM: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Tech Blog</title>
  <link href="https://example.com/"/>
  <id>https://example.com/feed.atom</id>
  <updated>2024-01-15T12:00:00Z</updated>
  <entry>
    <title>Understanding WebAssembly</title>
    <link href="https://example.com/posts/wasm-intro"/>
    <id>https://example.com/posts/wasm-intro</id>
    <updated>2024-01-15T12:00:00Z</updated>
    <summary type="html"><![CDATA[<p>WebAssembly is a binary instruction format...</p>]]></summary>
  </entry>
</feed>"#;

    #[test]
    fn test_rss_entries_mapped_to_raw() {
        let entries = HttpFetcher::entries_from_bytes(SAMPLE_RSS).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Announcing Rust 1.75.0"));
        assert_eq!(
            entries[0].link.as_deref(),
            Some("https://blog.rust-lang.org/2023/12/28/Rust-1.75.0.html")
        );
        assert!(entries[0].published.is_some());
    }

    #[test]
    fn test_title_less_item_stays_optional() {
        let entries = HttpFetcher::entries_from_bytes(SAMPLE_RSS).unwrap();
        assert!(entries[1].title.is_none());
    }

    #[test]
    fn test_atom_summary_mapped() {
        let entries = HttpFetcher::entries_from_bytes(SAMPLE_ATOM).unwrap();

        assert_eq!(entries.len(), 1);
        assert!(entries[0]
            .summary
            .as_deref()
            .unwrap()
            .contains("WebAssembly"));
        assert_eq!(
            entries[0].link.as_deref(),
            Some("https://example.com/posts/wasm-intro")
        );
    }

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let result = HttpFetcher::entries_from_bytes(b"definitely not xml");
        assert!(matches!(result, Err(FeedlogError::FeedParse(_))));
    }
}
