//! Component discovery with a built-in fallback catalog.
//!
//! The live list is scraped from the upstream index page. When that page is
//! unreachable, or yields no components, the fixed catalog below is used.
//! Both paths produce identically shaped [`ComponentIdentity`] values.

use tracing::info;

use super::client::Upstream;
use super::extract::extract_component_slugs;
use super::model::ComponentIdentity;

/// Known component slugs, sorted.
pub const FALLBACK_SLUGS: [&str; 58] = [
    "accordion",
    "alert",
    "alert-dialog",
    "aspect-ratio",
    "avatar",
    "badge",
    "breadcrumb",
    "button",
    "button-group",
    "calendar",
    "card",
    "carousel",
    "chart",
    "checkbox",
    "collapsible",
    "combobox",
    "command",
    "context-menu",
    "data-table",
    "date-picker",
    "dialog",
    "drawer",
    "dropdown-menu",
    "empty",
    "field",
    "form",
    "hover-card",
    "input",
    "input-group",
    "input-otp",
    "item",
    "kbd",
    "label",
    "menubar",
    "navigation-menu",
    "pagination",
    "popover",
    "progress",
    "radio-group",
    "resizable",
    "scroll-area",
    "select",
    "separator",
    "sheet",
    "sidebar",
    "skeleton",
    "slider",
    "sonner",
    "spinner",
    "switch",
    "table",
    "tabs",
    "textarea",
    "toast",
    "toggle",
    "toggle-group",
    "tooltip",
    "typography",
];

/// Returns the fallback catalog as identities against `docs_base`.
#[must_use]
pub fn fallback_components(docs_base: &str) -> Vec<ComponentIdentity> {
    FALLBACK_SLUGS
        .iter()
        .map(|slug| ComponentIdentity::new(*slug, docs_base))
        .collect()
}

/// Lists every component, preferring the live index over the fallback catalog.
pub async fn list_all_components(upstream: &dyn Upstream) -> Vec<ComponentIdentity> {
    let docs_base = upstream.docs_base();

    let Some(index_html) = upstream.component_index_page().await else {
        info!("Component index unavailable, using fallback catalog");
        return fallback_components(docs_base);
    };

    let mut slugs: Vec<String> = extract_component_slugs(&index_html).into_iter().collect();
    if slugs.is_empty() {
        info!("Component index listed no components, using fallback catalog");
        return fallback_components(docs_base);
    }

    slugs.sort();
    slugs
        .into_iter()
        .map(|slug| ComponentIdentity::new(slug, docs_base))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_sorted_and_unique() {
        let mut sorted = FALLBACK_SLUGS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, FALLBACK_SLUGS.to_vec());
    }

    #[test]
    fn fallback_slugs_are_lowercase_hyphenated() {
        for slug in FALLBACK_SLUGS {
            assert!(
                slug.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "bad slug: {slug}"
            );
        }
    }

    #[test]
    fn fallback_identities() {
        let components = fallback_components("https://ui.shadcn.com");
        assert_eq!(components.len(), FALLBACK_SLUGS.len());
        let table = components
            .iter()
            .find(|c| c.slug() == "data-table")
            .unwrap();
        assert_eq!(table.display_name(), "Data Table");
    }
}
