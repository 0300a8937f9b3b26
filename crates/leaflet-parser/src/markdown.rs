//! Markdown parser using pulldown-cmark.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use leaflet_core::{Frontmatter, error::CoreError, frontmatter::parse_frontmatter};
use linkify::{LinkFinder, LinkKind};
use pulldown_cmark::{
    CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use thiserror::Error;

/// Markdown parsing errors.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// Failed to parse frontmatter.
    #[error("frontmatter error: {0}")]
    Frontmatter(#[from] CoreError),

    /// Document is not valid UTF-8.
    #[error("{path} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Result type for markdown operations.
pub type Result<T> = std::result::Result<T, MarkdownError>;

/// A markdown document split into metadata and converted HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Parsed frontmatter, default when the document has none.
    pub frontmatter: Frontmatter,
    /// HTML converted from the markdown body.
    pub html: String,
}

/// Markdown to HTML converter.
///
/// Enables the GFM-style extensions (tables, strikethrough, task lists,
/// footnotes, bare URL autolinks), gives every heading an anchor id and
/// renders each soft line break as `<br />`.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        options.insert(Options::ENABLE_GFM);

        Self { options }
    }

    /// Parse raw document bytes with frontmatter.
    pub fn parse_bytes(&self, content: &[u8], path: &Path) -> Result<ParsedDocument> {
        let content = std::str::from_utf8(content).map_err(|source| MarkdownError::InvalidUtf8 {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(content, path)
    }

    /// Parse markdown content with frontmatter.
    pub fn parse(&self, content: &str, path: &Path) -> Result<ParsedDocument> {
        let (frontmatter, body) = parse_frontmatter(content, path)?;
        let html = self.render(body);

        tracing::debug!(
            path = %path.display(),
            title = %frontmatter.title,
            bytes = html.len(),
            "converted markdown"
        );

        Ok(ParsedDocument { frontmatter, html })
    }

    /// Render a markdown body (no frontmatter) to HTML.
    pub fn render(&self, body: &str) -> String {
        let events = TextMergeStream::new(Parser::new_ext(body, self.options)).map(|event| {
            match event {
                Event::SoftBreak => Event::HardBreak,
                other => other,
            }
        });
        let mut events = autolink(events);
        assign_heading_ids(&mut events);

        let mut out = String::with_capacity(body.len() + body.len() / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Turn bare `scheme://` and `www.` URLs in text into links.
///
/// Text inside links, images and code blocks is left alone.
fn autolink<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]).url_must_have_scheme(false);

    let mut out = Vec::new();
    let mut skip = 0usize;
    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => skip += 1,
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                skip = skip.saturating_sub(1);
            }
            Event::Text(text) if skip == 0 => {
                if let Some(linked) = link_text(&finder, text) {
                    out.extend(linked);
                    continue;
                }
            }
            _ => {}
        }
        out.push(event);
    }
    out
}

/// Split `text` around the URLs it contains, `None` when there are none.
fn link_text<'a>(finder: &LinkFinder, text: &str) -> Option<Vec<Event<'a>>> {
    let mut events = Vec::new();
    let mut last = 0;

    for link in finder.links(text) {
        let url = link.as_str();
        let href = if url.contains("://") {
            url.to_string()
        } else if url.starts_with("www.") {
            format!("http://{url}")
        } else {
            continue;
        };

        if link.start() > last {
            events.push(Event::Text(CowStr::from(text[last..link.start()].to_string())));
        }
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(href),
            title: CowStr::from(""),
            id: CowStr::from(""),
        }));
        events.push(Event::Text(CowStr::from(url.to_string())));
        events.push(Event::End(TagEnd::Link));
        last = link.end();
    }

    if events.is_empty() {
        return None;
    }
    if last < text.len() {
        events.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
    Some(events)
}

/// Give every heading without an explicit `{#id}` a unique slug id.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();

    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }

        let text = heading_text(&events[i + 1..]);
        let slug = unique_slug(slugify(&text), &mut used);

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(slug));
        }
    }
}

/// Collect the plain text of a heading up to its closing tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

fn unique_slug(base: String, used: &mut HashSet<String>) -> String {
    let base = if base.is_empty() {
        "heading".to_string()
    } else {
        base
    };

    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Convert text to a URL-safe slug.
fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
