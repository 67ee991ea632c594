//! shadcn/ui component retrieval.
//!
//! This module turns the upstream documentation site and registry into
//! section-keyed records addressed as `shadcn://component/{slug}/{section}`:
//!
//! - [`client`] — single-attempt fetches, failures collapsed to `None`
//! - [`extract`] — regex extraction from HTML
//! - [`catalog`] — live discovery with a built-in fallback list
//! - [`address`] — the identifier space, enumeration and resolution
//! - [`format`] — Markdown rendering
//! - [`prompts`] — prompt templates
//!
//! [`ComponentService`] is the entry point used by the MCP server.

pub mod address;
pub mod catalog;
pub mod client;
pub mod error;
pub mod extract;
pub mod format;
pub mod model;
pub mod prompts;

pub use address::{ComponentUri, ResourceListing, Section, SectionRecord};
pub use client::{HttpUpstream, Upstream};
pub use error::{AddressError, FetchError, FetchResult};
pub use model::ComponentIdentity;

use std::sync::Arc;

use format::RenderedDocument;

/// Which sections a `get-component-info` call asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSelection {
    /// Every section, plus next steps.
    All,
    /// A single section.
    Only(Section),
}

impl SectionSelection {
    /// Interprets the optional `section` argument. Missing or unrecognised
    /// values select everything.
    #[must_use]
    pub fn from_argument(section: Option<&str>) -> Self {
        section
            .and_then(|s| s.parse().ok())
            .map_or(Self::All, Self::Only)
    }
}

/// Component lookups over an [`Upstream`].
///
/// Holds no per-request state, so clones can serve concurrent requests.
#[derive(Clone)]
pub struct ComponentService {
    upstream: Arc<dyn Upstream>,
}

impl ComponentService {
    /// Creates a service over `upstream`.
    #[must_use]
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    /// Builds the identity for `slug`.
    #[must_use]
    pub fn identity(&self, slug: &str) -> ComponentIdentity {
        ComponentIdentity::new(slug, self.upstream.docs_base())
    }

    /// Lists every known component.
    pub async fn list_components(&self) -> Vec<ComponentIdentity> {
        catalog::list_all_components(self.upstream.as_ref()).await
    }

    /// Renders the component list.
    pub async fn list_components_text(&self) -> String {
        format::component_list(&self.list_components().await)
    }

    /// Lists every resource: each section for each component.
    pub async fn list_resources(&self) -> Vec<ResourceListing> {
        let components = self.list_components().await;
        Section::ALL
            .into_iter()
            .flat_map(|section| address::enumerate(section, &components))
            .collect()
    }

    /// Resolves one section of one component.
    pub async fn resolve(&self, slug: &str, section: Section) -> SectionRecord {
        address::resolve(self.upstream.as_ref(), slug, section).await
    }

    /// Resolves and renders a resource document.
    pub async fn read_resource(&self, uri: &ComponentUri) -> RenderedDocument {
        let record = self.resolve(&uri.slug, uri.section).await;
        format::section_document(&self.identity(&uri.slug), &record)
    }

    /// Builds the `get-component-info` report.
    pub async fn component_info(&self, slug: &str, selection: SectionSelection) -> String {
        let component = self.identity(slug);
        match selection {
            SectionSelection::All => {
                let (documentation, installation, examples, source) = tokio::join!(
                    self.resolve(slug, Section::Documentation),
                    self.resolve(slug, Section::Installation),
                    self.resolve(slug, Section::Examples),
                    self.resolve(slug, Section::Source),
                );
                format::component_report(
                    &component,
                    &[documentation, installation, examples, source],
                    true,
                )
            }
            SectionSelection::Only(section) => {
                let record = self.resolve(slug, section).await;
                format::component_report(&component, &[record], false)
            }
        }
    }
}
