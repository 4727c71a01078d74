use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use wordpeek_config::lookup::LookupConfig;
use wordpeek_core::lookup::LookupService;
use wordpeek_types::LookupOutcome;

use crate::error::LookupError;
use crate::format::format_entries;
use crate::types::Entry;

/// HTTP client for the free dictionary API
#[derive(Clone)]
pub struct DictionaryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl DictionaryClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let base_url =
            Url::parse(&config.api_url).map_err(|e| LookupError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(config.api_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("wordpeek/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Request URL with `text` percent-encoded as the final path segment
    pub fn entry_url(&self, text: &str) -> Result<Url, LookupError> {
        if is_dot_segment(text) {
            return Err(LookupError::DotSegment(text.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(text);
        Ok(url)
    }

    /// `Ok(None)` means the provider has no entry for `text`
    pub async fn fetch(&self, text: &str) -> Result<Option<String>, LookupError> {
        if is_dot_segment(text) {
            tracing::debug!("[LOOKUP] Dot segment selection, no request sent");
            return Ok(None);
        }

        let url = self.entry_url(text)?;
        tracing::debug!("[LOOKUP] GET {}", url);

        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await?;
                let entries: Vec<Entry> = serde_json::from_slice(&body)?;
                tracing::debug!("[LOOKUP] {} entries for '{}'", entries.len(), text);
                Ok(format_entries(&entries))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(LookupError::UnexpectedStatus(status.as_u16())),
        }
    }
}

/// URL parsing resolves `.` and `..` away, even percent-encoded as `%2E`,
/// so they can never reach the provider as a word
fn is_dot_segment(text: &str) -> bool {
    matches!(text, "." | "..")
}

#[async_trait]
impl LookupService for DictionaryClient {
    async fn lookup(&self, text: &str) -> LookupOutcome {
        match self.fetch(text).await {
            Ok(Some(report)) => LookupOutcome::Success(report),
            Ok(None) => {
                tracing::info!("[LOOKUP] No entry ({} chars)", text.chars().count());
                tracing::debug!("[LOOKUP] No entry for '{}'", text);
                LookupOutcome::NotFound
            }
            Err(e) => {
                tracing::warn!("[LOOKUP] Lookup failed: {}", e);
                LookupOutcome::Error(e.to_string())
            }
        }
    }
}
