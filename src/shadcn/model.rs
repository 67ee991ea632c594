//! Records produced by the retrieval pipeline.
//!
//! Every record is built fresh for a single request and dropped once it has
//! been rendered. Nothing here is cached or mutated after construction.

use serde::{Deserialize, Deserializer};

/// Path under the documentation site where component pages live.
pub const COMPONENTS_PATH: &str = "/docs/components";

/// CLI used to add a component to a project.
pub const CLI_ADD_COMMAND: &str = "npx shadcn@latest add";

/// CLI used to initialise shadcn/ui in a project.
pub const CLI_INIT_COMMAND: &str = "npx shadcn@latest init";

/// Uppercases the first character of `s`, leaving the rest untouched.
///
/// `"data-table"` becomes `"Data-table"`.
#[must_use]
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Derives the display name for a slug: split on `-`, capitalise each segment.
///
/// `"alert-dialog"` becomes `"Alert Dialog"`.
#[must_use]
pub fn display_name(slug: &str) -> String {
    slug.split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the documentation page URL for a slug.
#[must_use]
pub fn component_url(docs_base: &str, slug: &str) -> String {
    format!(
        "{}{COMPONENTS_PATH}/{slug}",
        docs_base.trim_end_matches('/')
    )
}

/// A component known to the server, addressed by its slug.
///
/// The display name and URL are derived from the slug when the identity is
/// built and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIdentity {
    slug: String,
    display_name: String,
    url: String,
}

impl ComponentIdentity {
    /// Creates the identity for `slug` against the given documentation base.
    #[must_use]
    pub fn new(slug: impl Into<String>, docs_base: &str) -> Self {
        let slug = slug.into();
        Self {
            display_name: display_name(&slug),
            url: component_url(docs_base, &slug),
            slug,
        }
    }

    /// Stable lowercase hyphenated key.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Human-readable name, e.g. `Data Table`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Documentation page URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Summary of a component's documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationRecord {
    /// Slug with its first letter capitalised.
    pub name: String,
    /// Meta description, or `"{name} component"` when the page has none.
    pub description: String,
    /// The page as fetched.
    pub raw_content: String,
}

/// A single code example, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleRecord {
    /// Decoded and trimmed code.
    pub code: String,
    /// Optional heading for the example.
    pub title: Option<String>,
    /// Optional prose shown above the code.
    pub description: Option<String>,
}

impl ExampleRecord {
    /// Creates an untitled example.
    #[must_use]
    pub const fn new(code: String) -> Self {
        Self {
            code,
            title: None,
            description: None,
        }
    }
}

/// The main source file of a component, taken from its registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// File name reported by the registry, or `{slug}.tsx`.
    pub file_name: String,
    /// File contents.
    pub code: String,
    /// Package dependencies listed by the registry.
    pub imports: Vec<String>,
}

/// Install guidance. Standardised across components, so no fetch is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationRecord {
    /// Shell command that adds the component.
    pub cli_command: String,
    /// Packages the component may pull in.
    pub dependencies: Vec<String>,
    /// Steps for adding the component by hand.
    pub manual_steps: Vec<String>,
}

impl InstallationRecord {
    /// Derives the install guidance for `slug`.
    #[must_use]
    pub fn for_slug(slug: &str) -> Self {
        Self {
            cli_command: format!("{CLI_ADD_COMMAND} {slug}"),
            dependencies: vec!["@radix-ui/react-*".to_string()],
            manual_steps: vec![
                "Ensure you have initialized shadcn-ui in your project".to_string(),
                "Run the CLI command to add the component".to_string(),
                "Import and use the component in your code".to_string(),
            ],
        }
    }
}

/// A registry entry as served by the upstream registry.
///
/// Only the fields the server reads are modelled; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryEntry {
    /// Installable files. The first one is the component itself.
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<RegistryFile>,
    /// npm dependencies.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,
}

/// One file in a registry entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryFile {
    /// File name (newer registries call it `path`).
    #[serde(default, alias = "path")]
    pub name: Option<String>,
    /// File contents.
    #[serde(default)]
    pub content: Option<String>,
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RegistryEntry {
    /// Turns the entry into a source record for `slug`.
    ///
    /// Returns `None` if the entry carries no files.
    #[must_use]
    pub fn into_source(self, slug: &str) -> Option<SourceRecord> {
        let mut files = self.files.into_iter();
        let main = files.next()?;
        Some(SourceRecord {
            file_name: main.name.unwrap_or_else(|| format!("{slug}.tsx")),
            code: main.content.unwrap_or_default(),
            imports: self.dependencies,
        })
    }
}
