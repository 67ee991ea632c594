//! Resource addressing: `shadcn://component/{slug}/{section}`.
//!
//! A single table-driven scheme covers every component and every section.
//! [`enumerate`] lists the identifiers for one section across all known
//! components; [`resolve`] turns a `(slug, section)` pair into a record by
//! dispatching on the section alone.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::client::Upstream;
use super::error::AddressError;
use super::extract::{documentation_record, example_records};
use super::model::{
    ComponentIdentity, DocumentationRecord, ExampleRecord, InstallationRecord, SourceRecord,
};

/// Prefix shared by every component resource identifier.
pub const URI_PREFIX: &str = "shadcn://component/";

/// MIME type declared for every component resource.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// A facet of information about a component. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Summary of the documentation page.
    Documentation,
    /// Code examples scraped from the documentation page.
    Examples,
    /// Main source file from the registry.
    Source,
    /// Install guidance.
    Installation,
}

impl Section {
    /// Every section, in presentation order.
    pub const ALL: [Self; 4] = [
        Self::Documentation,
        Self::Examples,
        Self::Source,
        Self::Installation,
    ];

    /// Identifier segment, e.g. `examples`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Documentation => "documentation",
            Self::Examples => "examples",
            Self::Source => "source",
            Self::Installation => "installation",
        }
    }

    /// Title-case label used in listing names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Documentation => "Documentation",
            Self::Examples => "Examples",
            Self::Source => "Source",
            Self::Installation => "Installation",
        }
    }

    /// Description of this section for one component.
    #[must_use]
    pub fn describe(self, display_name: &str) -> String {
        match self {
            Self::Documentation => {
                format!("Complete documentation for the {display_name} component from Shadcn/ui")
            }
            Self::Examples => format!("Working code examples for the {display_name} component"),
            Self::Source => {
                format!("Source code for the {display_name} component from the registry")
            }
            Self::Installation => {
                format!("Installation instructions for the {display_name} component")
            }
        }
    }

    /// Description of this section across all components.
    #[must_use]
    pub const fn template_description(self) -> &'static str {
        match self {
            Self::Documentation => "Documentation for Shadcn/ui components",
            Self::Examples => "Code examples for Shadcn/ui components",
            Self::Source => "Source code for Shadcn/ui components",
            Self::Installation => "Installation instructions for Shadcn/ui components",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| AddressError::UnknownSection {
                section: s.to_string(),
            })
    }
}

/// A canonical component resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentUri {
    /// Component slug.
    pub slug: String,
    /// Requested section.
    pub section: Section,
}

impl ComponentUri {
    /// Creates an identifier for `slug` and `section`.
    #[must_use]
    pub fn new(slug: impl Into<String>, section: Section) -> Self {
        Self {
            slug: slug.into(),
            section,
        }
    }

    /// Parses `shadcn://component/{slug}/{section}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier has the wrong shape, an empty slug
    /// segment, or a section outside the closed set.
    pub fn parse(uri: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidUri {
            uri: uri.to_string(),
        };

        let rest = uri.strip_prefix(URI_PREFIX).ok_or_else(invalid)?;
        // Discovered slugs may themselves contain '/', so the section is the
        // last segment and everything before it is the slug.
        let (slug, section) = rest.rsplit_once('/').ok_or_else(invalid)?;
        if slug.split('/').any(str::is_empty) {
            return Err(invalid());
        }

        Ok(Self::new(slug, section.parse()?))
    }
}

impl fmt::Display for ComponentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{URI_PREFIX}{}/{}", self.slug, self.section)
    }
}

impl FromStr for ComponentUri {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One entry in a resource listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListing {
    /// Canonical identifier.
    pub uri: String,
    /// `"{displayName} {SectionLabel}"`.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Declared content kind.
    pub mime_type: &'static str,
}

/// A parameterised identifier covering one section for every component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplate {
    /// RFC 6570 template.
    pub uri_template: String,
    /// Template name, e.g. `component-documentation`.
    pub name: String,
    /// Short description.
    pub description: &'static str,
    /// Declared content kind.
    pub mime_type: &'static str,
}

/// Returns the template for every section.
#[must_use]
pub fn templates() -> Vec<ResourceTemplate> {
    Section::ALL
        .into_iter()
        .map(|section| ResourceTemplate {
            uri_template: format!("{URI_PREFIX}{{component}}/{section}"),
            name: format!("component-{section}"),
            description: section.template_description(),
            mime_type: MARKDOWN_MIME,
        })
        .collect()
}

/// Lists one entry per component for `section`.
#[must_use]
pub fn enumerate(section: Section, components: &[ComponentIdentity]) -> Vec<ResourceListing> {
    components
        .iter()
        .map(|component| ResourceListing {
            uri: ComponentUri::new(component.slug(), section).to_string(),
            name: format!("{} {}", component.display_name(), section.label()),
            description: section.describe(component.display_name()),
            mime_type: MARKDOWN_MIME,
        })
        .collect()
}

/// The record produced for one section. Absent upstream data stays absent
/// here; rendering a readable message for it is the formatter's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRecord {
    /// Documentation summary, or `None` if the page could not be fetched.
    Documentation(Option<DocumentationRecord>),
    /// Code examples; empty if the page could not be fetched or had none.
    Examples(Vec<ExampleRecord>),
    /// Main source file, or `None` if the registry had nothing usable.
    Source(Option<SourceRecord>),
    /// Install guidance. Always available.
    Installation(InstallationRecord),
}

impl SectionRecord {
    /// The section this record belongs to.
    #[must_use]
    pub const fn section(&self) -> Section {
        match self {
            Self::Documentation(_) => Section::Documentation,
            Self::Examples(_) => Section::Examples,
            Self::Source(_) => Section::Source,
            Self::Installation(_) => Section::Installation,
        }
    }

    /// Returns `true` if upstream data was missing for this section.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Documentation(docs) => docs.is_none(),
            Self::Examples(examples) => examples.is_empty(),
            Self::Source(source) => source.is_none(),
            Self::Installation(_) => false,
        }
    }
}

/// Resolves `(slug, section)` into a record. Never fails.
pub async fn resolve(upstream: &dyn Upstream, slug: &str, section: Section) -> SectionRecord {
    match section {
        Section::Documentation => SectionRecord::Documentation(
            upstream
                .documentation_page(slug)
                .await
                .map(|html| documentation_record(slug, html)),
        ),
        Section::Examples => SectionRecord::Examples(
            upstream
                .documentation_page(slug)
                .await
                .map(|html| example_records(&html))
                .unwrap_or_default(),
        ),
        Section::Source => SectionRecord::Source(
            upstream
                .registry_entry(slug)
                .await
                .and_then(|entry| entry.into_source(slug)),
        ),
        Section::Installation => SectionRecord::Installation(InstallationRecord::for_slug(slug)),
    }
}
