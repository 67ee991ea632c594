//! Integration tests for HTML extraction.

use shadcn_ui_mcp::shadcn::extract::{
    documentation_record, example_records, extract_code_blocks, extract_component_slugs,
    extract_description,
};

mod common;

#[test]
fn slugs_skip_fragments_and_non_component_pages() {
    let html = r##"<a href="/docs/components/button">B</a>
<a href="/docs/components/dialog#usage">D</a>
<a href="/docs/components/index">I</a>"##;

    let slugs: Vec<_> = extract_component_slugs(html).into_iter().collect();
    assert_eq!(slugs, vec!["button"]);
}

#[test]
fn slugs_are_distinct_in_first_seen_order() {
    let slugs: Vec<_> = extract_component_slugs(&common::index_page())
        .into_iter()
        .collect();
    assert_eq!(slugs, vec!["tabs", "accordion", "button"]);
}

#[test]
fn slugs_ignore_other_sections() {
    let html = r#"<a href="/docs/installation/next">Next</a><a href="/blocks/login">Login</a>"#;
    assert!(extract_component_slugs(html).is_empty());
}

#[test]
fn code_blocks_in_document_order_and_decoded() {
    let html = "<pre><code>first()</code></pre><p>between</p><pre class=\"x\"><code class=\"y\">&lt;div&gt;</code></pre>";
    assert_eq!(extract_code_blocks(html), vec!["first()", "<div>"]);
}

#[test]
fn code_blocks_span_lines_and_are_trimmed() {
    let html = "<pre><code>\n  const a = 1;\n  const b = 2;\n</code></pre>";
    assert_eq!(
        extract_code_blocks(html),
        vec!["const a = 1;\n  const b = 2;"]
    );
}

#[test]
fn double_escaped_ampersand_decodes_once() {
    let html = "<pre><code>&amp;lt;T&amp;gt; &amp;&amp; &#39;x&#39;</code></pre>";
    assert_eq!(extract_code_blocks(html), vec!["&lt;T&gt; && 'x'"]);
}

#[test]
fn extraction_is_idempotent() {
    let page = common::button_page();
    assert_eq!(extract_code_blocks(&page), extract_code_blocks(&page));
    assert_eq!(
        extract_description(&page, "button"),
        extract_description(&page, "button")
    );
    assert_eq!(
        extract_component_slugs(&common::index_page()),
        extract_component_slugs(&common::index_page())
    );
}

#[test]
fn documentation_record_from_page() {
    let record = documentation_record("button", common::button_page());
    assert_eq!(record.name, "Button");
    assert_eq!(
        record.description,
        "Displays a button or a component that looks like a button."
    );
    assert_eq!(record.raw_content, common::button_page());
}

#[test]
fn documentation_record_without_meta() {
    let record = documentation_record("data-table", "<html></html>".to_string());
    assert_eq!(record.description, "Data-table component");
}

#[test]
fn example_records_have_no_titles() {
    let examples = example_records(&common::button_page());
    assert_eq!(examples.len(), 2);
    assert_eq!(
        examples[1].code,
        r#"<Button variant="outline">Button</Button>"#
    );
    assert!(examples.iter().all(|e| e.title.is_none()));
}

#[test]
fn page_without_code_yields_no_examples() {
    assert!(example_records("<p>No code here</p>").is_empty());
}
