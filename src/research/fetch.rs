//! Page fetching and HTML-to-text reduction

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{AgentError, Result};

/// Source of page text for summarization
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Fetches pages over HTTP and reduces HTML to readable text
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AgentError::Fetch(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Fetch(format!("HTTP error {} for {}", status, url)));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| AgentError::Fetch(format!("Failed to read body of {}: {}", url, e)))?;

        debug!(url = %url, content_type = %content_type, bytes = body.len(), "Fetched page");

        if content_type.contains("html") {
            Ok(html_to_text(&body))
        } else {
            Ok(body)
        }
    }
}

/// Reduce an HTML document to readable text, one block per line
pub fn html_to_text(html: &str) -> String {
    let stripped = strip_elements(html, &["script", "style", "noscript"]);

    let mut text = String::with_capacity(stripped.len());
    let mut in_tag = false;
    let mut tag = String::new();

    for c in stripped.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                text.push(if is_block_tag(&tag) { '\n' } else { ' ' });
            }
            _ if in_tag => tag.push(c),
            _ => text.push(c),
        }
    }

    decode_entities(&text)
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop every `<tag ...>...</tag>` element, contents included
fn strip_elements(html: &str, tags: &[&str]) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    while pos < html.len() {
        let next = tags
            .iter()
            .filter_map(|t| lower[pos..].find(&format!("<{}", t)).map(|i| (pos + i, *t)))
            .min_by_key(|(i, _)| *i);

        let Some((start, tag)) = next else {
            out.push_str(&html[pos..]);
            break;
        };

        out.push_str(&html[pos..start]);
        let close = format!("</{}>", tag);
        pos = match lower[start..].find(&close) {
            Some(end) => start + end + close.len(),
            None => html.len(),
        };
    }

    out
}

fn is_block_tag(tag: &str) -> bool {
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    matches!(
        name.as_str(),
        "p" | "div"
            | "br"
            | "li"
            | "ul"
            | "ol"
            | "tr"
            | "table"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
    )
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
