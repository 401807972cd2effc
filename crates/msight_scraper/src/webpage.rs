//! HTTP-backed content extractor.

use crate::extract_from_html;
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use msight_core::{ExtractedContent, ScraperSettings};
use msight_error::{FetchError, FetchErrorKind, MsightResult, ParseError};
use msight_interface::ContentExtractor;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use tracing::{debug, info, instrument, warn};

/// Fetches pages with a shared HTTP client and extracts their content.
///
/// One outbound request per call, no retry. Deadlines and cancellation are
/// applied by the caller.
#[derive(Debug, Clone)]
pub struct WebpageScraper {
    client: Client,
    settings: ScraperSettings,
}

impl WebpageScraper {
    /// Create a scraper from extractor settings.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the HTTP client cannot be built.
    pub fn new(settings: ScraperSettings) -> MsightResult<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent().as_str())
            .build()
            .map_err(|e| {
                FetchError::new(FetchErrorKind::Request(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self { client, settings })
    }

    /// Extractor settings in effect.
    pub fn settings(&self) -> &ScraperSettings {
        &self.settings
    }

    fn parse_url(url: &str) -> Result<Url, FetchError> {
        let parsed = Url::parse(url.trim())
            .map_err(|_| FetchError::new(FetchErrorKind::InvalidUrl(url.to_string())))?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            _ => Err(FetchError::new(FetchErrorKind::InvalidUrl(url.to_string()))),
        }
    }

    async fn fetch_markup(&self, url: Url) -> MsightResult<String> {
        let mut response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            FetchError::new(FetchErrorKind::Request(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Non-success status");
            return Err(FetchError::new(FetchErrorKind::Status {
                status: status.as_u16(),
                url: url.to_string(),
            })
            .into());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("text/html")
            .to_ascii_lowercase();

        if !is_markup(&content_type) {
            return Err(ParseError::new(format!(
                "Expected markup, got content type '{}'",
                content_type
            ))
            .into());
        }

        let max_bytes = *self.settings.max_body_bytes();
        if let Some(length) = response.content_length() {
            if length > max_bytes as u64 {
                return Err(oversize(length, max_bytes).into());
            }
        }

        // Chunked bodies carry no length; stop as soon as the cap is passed.
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::new(FetchErrorKind::Body(e.to_string())))?
        {
            let received = body.len() + chunk.len();
            if received > max_bytes {
                warn!(received, max_bytes, "Body exceeds limit, aborting read");
                return Err(oversize(received as u64, max_bytes).into());
            }
            body.extend_from_slice(&chunk);
        }

        debug!(bytes = body.len(), content_type = %content_type, "Body received");
        Ok(decode(&body, &content_type))
    }
}

fn oversize(length: u64, max_bytes: usize) -> FetchError {
    FetchError::new(FetchErrorKind::Body(format!(
        "body of {} bytes exceeds limit of {} bytes",
        length, max_bytes
    )))
}

fn is_markup(content_type: &str) -> bool {
    content_type.contains("html") || content_type.contains("xml")
}

/// `charset` parameter of a content type, if any.
fn charset(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.trim().strip_prefix("charset="))
        .map(|value| value.trim_matches('"'))
        .next()
}

/// Decode `body` with the declared charset, falling back to UTF-8 for a
/// missing or unknown label. Malformed sequences become U+FFFD.
fn decode(body: &[u8], content_type: &str) -> String {
    let encoding = charset(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        warn!(encoding = used.name(), "Body contained malformed sequences");
    }
    text.into_owned()
}

#[async_trait]
impl ContentExtractor for WebpageScraper {
    #[instrument(
        skip(self),
        fields(
            titles = tracing::field::Empty,
            paragraphs = tracing::field::Empty,
            images = tracing::field::Empty
        )
    )]
    async fn extract(&self, url: &str) -> MsightResult<ExtractedContent> {
        let parsed = Self::parse_url(url)?;
        let html = self.fetch_markup(parsed).await?;
        let content = extract_from_html(&html)?;

        let span = tracing::Span::current();
        span.record("titles", content.titles().len());
        span.record("paragraphs", content.paragraphs().len());
        span.record("images", content.images().len());
        info!("Extracted page content");

        Ok(content)
    }
}
