//! Lyrics extraction from public Genius song pages.
//!
//! The API does not expose lyrics, so they are read from the HTML of the
//! song page. Lyrics live in elements whose class starts with
//! `Lyrics__Container` below `#lyrics-root`; section headers injected by the
//! site (`LyricsHeader*`) are skipped and `<br>` becomes a newline.
//!
//! Containers are concatenated without a separator, so a line split across
//! two containers is glued together. This mirrors the page layout and is a
//! known fragility of scraping.

use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, instrument};

use super::GeniusError;

const LYRICS_ROOT_SELECTOR: &str = "#lyrics-root";
const LYRICS_CONTAINER_SELECTOR: &str = "[class^='Lyrics__Container']";
const LYRICS_HEADER_CLASS_PREFIX: &str = "LyricsHeader";

/// Fetches song pages and extracts their lyrics.
#[derive(Debug, Clone)]
pub struct LyricsScraper {
    http: reqwest::Client,
}

impl LyricsScraper {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch a page and extract its lyrics.
    ///
    /// Returns `Ok(None)` when the page has no recognizable lyrics block. A
    /// non-2xx answer is a [`GeniusError::Fetch`].
    #[instrument(skip(self))]
    pub async fn scrape(&self, url: &str) -> Result<Option<String>, GeniusError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GeniusError::transport(format!("Failed to fetch URL {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeniusError::fetch(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| GeniusError::transport(format!("Failed to read page body: {e}")))?;
        debug!("Fetched {} bytes of HTML", html.len());

        Ok(extract_lyrics(&html))
    }
}

/// Extract the lyrics text from a song page.
///
/// `None` when there is no lyrics root or no container under it.
pub fn extract_lyrics(html: &str) -> Option<String> {
    let root_selector = Selector::parse(LYRICS_ROOT_SELECTOR).ok()?;
    let container_selector = Selector::parse(LYRICS_CONTAINER_SELECTOR).ok()?;

    let document = Html::parse_document(html);
    let root = document.select(&root_selector).next()?;

    let mut containers = root.select(&container_selector).peekable();
    containers.peek()?;

    let mut lyrics = String::new();
    for container in containers {
        push_text(container, &mut lyrics);
    }
    Some(lyrics)
}

fn is_header(element: &ElementRef<'_>) -> bool {
    element
        .value()
        .attr("class")
        .is_some_and(|class| class.starts_with(LYRICS_HEADER_CLASS_PREFIX))
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !is_header(&child_el) {
                        push_text(child_el, out);
                    }
                }
            }
            _ => {}
        }
    }
}
