//! Pattern-based extraction from upstream markup.
//!
//! The upstream pages are scraped with a handful of fixed regular
//! expressions, not parsed as a DOM. Markup changes upstream can silently
//! reduce what is found; every function here degrades to its default or an
//! empty result rather than failing.
//!
//! All functions are pure: the same input always yields the same output.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{capitalize_first, DocumentationRecord, ExampleRecord};

/// First `<meta name="description" content="...">` tag.
static META_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s+name="description"\s+content="([^"]+)""#)
        .expect("meta description pattern is valid")
});

/// Every `<pre><code>...</code></pre>` span, non-greedy.
static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<pre[^>]*><code[^>]*>(.*?)</code></pre>").expect("code block pattern is valid")
});

/// Every anchor pointing at a component page.
static COMPONENT_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"href="/docs/components/([^"]+)""#).expect("component href pattern is valid")
});

/// Index-page links that are not components.
const NON_COMPONENT_PAGES: [&str; 2] = ["index", "installation"];

/// Entity replacements, applied in order. `&amp;` must stay last so that
/// `&amp;lt;` decodes to `&lt;` rather than `<`.
const ENTITIES: [(&str, &str); 5] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// Returns the page's meta description, or `"{Name} component"` if it has none.
#[must_use]
pub fn extract_description(html: &str, slug: &str) -> String {
    META_DESCRIPTION
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or_else(
            || format!("{} component", capitalize_first(slug)),
            |m| m.as_str().to_string(),
        )
}

/// Returns every code block in document order, entity-decoded and trimmed.
///
/// Nested blocks are not distinguished: the pattern stops at the first
/// closing `</code></pre>`.
#[must_use]
pub fn extract_code_blocks(html: &str) -> Vec<String> {
    CODE_BLOCK
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| decode_entities(m.as_str()).trim().to_string())
        .collect()
}

/// Returns the distinct component slugs linked from an index page, in
/// first-seen order.
///
/// Fragment links (`#`) and the `index`/`installation` pages are skipped.
/// Sorting is left to the caller.
#[must_use]
pub fn extract_component_slugs(index_html: &str) -> IndexSet<String> {
    COMPONENT_HREF
        .captures_iter(index_html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|slug| !slug.contains('#') && !NON_COMPONENT_PAGES.contains(slug))
        .map(str::to_string)
        .collect()
}

/// Builds the documentation record for a fetched page.
#[must_use]
pub fn documentation_record(slug: &str, html: String) -> DocumentationRecord {
    DocumentationRecord {
        name: capitalize_first(slug),
        description: extract_description(&html, slug),
        raw_content: html,
    }
}

/// Builds example records for a fetched page.
#[must_use]
pub fn example_records(html: &str) -> Vec<ExampleRecord> {
    extract_code_blocks(html)
        .into_iter()
        .map(ExampleRecord::new)
        .collect()
}

fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, ch)| acc.replace(entity, ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_from_meta_tag() {
        let html = r#"<head><meta name="description" content="Displays a button."></head>"#;
        assert_eq!(extract_description(html, "button"), "Displays a button.");
    }

    #[test]
    fn description_match_is_case_insensitive() {
        let html = r#"<META NAME="description" CONTENT="Upper."></head>"#;
        // Attribute names are matched case-insensitively too.
        assert_eq!(extract_description(html, "button"), "Upper.");
    }

    #[test]
    fn description_takes_first_match() {
        let html = r#"<meta name="description" content="First"><meta name="description" content="Second">"#;
        assert_eq!(extract_description(html, "x"), "First");
    }

    #[test]
    fn description_fallback() {
        assert_eq!(extract_description("", "data-table"), "Data-table component");
        assert_eq!(
            extract_description(r#"<meta name="description" content="">"#, "card"),
            "Card component"
        );
    }

    #[test]
    fn decode_order_keeps_double_encoding() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&lt;a href=&quot;x&quot;&gt;"), "<a href=\"x\">");
        assert_eq!(decode_entities("it&#39;s"), "it's");
    }

    #[test]
    fn code_blocks_with_attributes() {
        let html = r#"<pre class="x" data-lang="tsx"><code class="language-tsx">  const a = 1;  </code></pre>"#;
        assert_eq!(extract_code_blocks(html), vec!["const a = 1;"]);
    }

    #[test]
    fn code_blocks_span_lines() {
        let html = "<pre><code>line one\nline two\n</code></pre>";
        assert_eq!(extract_code_blocks(html), vec!["line one\nline two"]);
    }

    #[test]
    fn code_blocks_empty_input() {
        assert!(extract_code_blocks("").is_empty());
        assert!(extract_code_blocks("<pre>not code</pre>").is_empty());
    }

    #[test]
    fn slugs_deduplicated_in_first_seen_order() {
        let html = r#"
            <a href="/docs/components/tabs">Tabs</a>
            <a href="/docs/components/button">Button</a>
            <a href="/docs/components/tabs">Tabs again</a>
            <a href="/docs/components/installation">Install</a>
            <a href="/docs/components/">Empty</a>
        "#;
        let slugs: Vec<_> = extract_component_slugs(html).into_iter().collect();
        assert_eq!(slugs, vec!["tabs", "button"]);
    }

    #[test]
    fn slugs_keep_nested_paths() {
        let html = r#"<a href="/docs/components/radix/button">B</a>"#;
        let slugs: Vec<_> = extract_component_slugs(html).into_iter().collect();
        assert_eq!(slugs, vec!["radix/button"]);
    }
}
