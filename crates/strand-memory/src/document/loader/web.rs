use std::pin::Pin;
use std::time::Duration;

use url::Url;

use super::super::{Document, DocumentError, DocumentLoader, DocumentMetadata};

/// Default maximum response body: 5 MiB.
const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Loads a web page and extracts its visible text.
pub struct WebLoader {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl Default for WebLoader {
    fn default() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(3))
            .build()
            .unwrap_or_default();
        Self {
            client,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl WebLoader {
    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    async fn fetch(&self, url: &str) -> Result<String, DocumentError> {
        let resp = self.client.get(url).send().await?;
        let resp = resp.error_for_status()?;
        let bytes = resp.bytes().await?;
        if bytes.len() > self.max_body_bytes {
            return Err(DocumentError::InvalidUrl(format!(
                "response too large: {} bytes",
                bytes.len()
            )));
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl DocumentLoader for WebLoader {
    fn load(
        &self,
        source: &str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>>
    {
        let url = source.to_owned();
        Box::pin(async move {
            if Url::parse(&url).is_err() {
                return Err(DocumentError::InvalidUrl(url));
            }

            let html = self.fetch(&url).await?;
            let content =
                tokio::task::spawn_blocking(move || visible_text(&html))
                    .await
                    .map_err(|e| DocumentError::Io(std::io::Error::other(e)))?;

            Ok(vec![Document {
                content,
                metadata: DocumentMetadata::new(url, "text/html"),
            }])
        })
    }
}

/// Text of the page body, paragraphs joined by newlines. Falls back to the
/// whole tree when there is no `<body>`.
fn visible_text(html: &str) -> String {
    let soup = scrape_core::Soup::parse(html);

    for selector in ["body", "html"] {
        if let Ok(tags) = soup.find_all(selector)
            && let Some(tag) = tags.first()
        {
            let text = tag.text();
            if !text.trim().is_empty() {
                return collapse_whitespace(&text);
            }
        }
    }
    String::new()
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let line = line.trim();
        if !line.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(line);
        }
    }
    out
}
