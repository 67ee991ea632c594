//! Remote source client.
//!
//! Three fetches, one attempt each, no retries and no caching:
//!
//! - the documentation page for a slug (HTML)
//! - the registry entry for a slug (JSON)
//! - the component index page (HTML)
//!
//! Every failure is logged and collapsed into `None`. Callers only ever see
//! "got it" or "didn't".

use async_trait::async_trait;
use tracing::{debug, warn};

use super::error::{FetchError, FetchResult};
use super::model::{component_url, RegistryEntry, COMPONENTS_PATH};
use crate::config::UpstreamConfig;

/// Source of upstream component data.
///
/// Implementations must not fail past this boundary: any problem is reported
/// as `None`.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Base URL of the documentation site, used to derive component URLs.
    fn docs_base(&self) -> &str;

    /// Fetches the documentation page for `slug`.
    async fn documentation_page(&self, slug: &str) -> Option<String>;

    /// Fetches the registry entry for `slug`. Entries without files are `None`.
    async fn registry_entry(&self, slug: &str) -> Option<RegistryEntry>;

    /// Fetches the page listing every component.
    async fn component_index_page(&self) -> Option<String>;
}

/// [`Upstream`] backed by HTTP.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    docs_base: String,
    registry_base: String,
}

impl HttpUpstream {
    /// Creates a client for the configured upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised (e.g. the
    /// TLS backend fails to load).
    pub fn new(config: &UpstreamConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self {
            client,
            docs_base: config.docs_base_url.trim_end_matches('/').to_string(),
            registry_base: config.registry_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the documentation page for `slug`.
    #[must_use]
    pub fn documentation_url(&self, slug: &str) -> String {
        component_url(&self.docs_base, slug)
    }

    /// URL of the registry entry for `slug`.
    #[must_use]
    pub fn registry_url(&self, slug: &str) -> String {
        format!("{}/{slug}.json", self.registry_base)
    }

    /// URL of the component index page.
    #[must_use]
    pub fn index_url(&self) -> String {
        format!("{}{COMPONENTS_PATH}", self.docs_base)
    }

    async fn get(&self, url: &str) -> FetchResult<reqwest::Response> {
        debug!(url, "Fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_text(&self, url: &str) -> FetchResult<String> {
        self.get(url).await?.text().await.map_err(FetchError::Body)
    }

    async fn get_registry_entry(&self, url: &str) -> FetchResult<RegistryEntry> {
        let entry: RegistryEntry = self
            .get(url)
            .await?
            .json()
            .await
            .map_err(FetchError::Body)?;

        if entry.files.is_empty() {
            return Err(FetchError::EmptyFileList);
        }
        Ok(entry)
    }
}

/// Logs a failed fetch and drops the error.
fn report<T>(result: FetchResult<T>, what: &str, slug: Option<&str>, url: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                slug = slug.unwrap_or("-"),
                url,
                status = e.status(),
                transport = e.is_transport(),
                error = %e,
                "Failed to fetch {what}"
            );
            None
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    fn docs_base(&self) -> &str {
        &self.docs_base
    }

    async fn documentation_page(&self, slug: &str) -> Option<String> {
        let url = self.documentation_url(slug);
        report(self.get_text(&url).await, "documentation", Some(slug), &url)
    }

    async fn registry_entry(&self, slug: &str) -> Option<RegistryEntry> {
        let url = self.registry_url(slug);
        report(
            self.get_registry_entry(&url).await,
            "component source",
            Some(slug),
            &url,
        )
    }

    async fn component_index_page(&self) -> Option<String> {
        let url = self.index_url();
        report(self.get_text(&url).await, "components list", None, &url)
    }
}
