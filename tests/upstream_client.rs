//! Integration tests for the HTTP upstream against a local server.

use std::sync::Arc;

use shadcn_ui_mcp::config::UpstreamConfig;
use shadcn_ui_mcp::shadcn::{ComponentService, HttpUpstream, SectionSelection, Upstream};

mod common;
use common::{serve_http, Route};

fn upstream_for(base: &str) -> HttpUpstream {
    HttpUpstream::new(&UpstreamConfig {
        docs_base_url: base.to_string(),
        registry_base_url: format!("{base}/registry"),
        user_agent: "shadcn-ui-mcp-tests".to_string(),
    })
    .unwrap()
}

const BUTTON_ENTRY: &str = r#"{
    "name": "button",
    "type": "registry:ui",
    "dependencies": ["@radix-ui/react-slot"],
    "files": [
        {"path": "ui/button.tsx", "content": "export function Button() {}", "type": "registry:ui"}
    ]
}"#;

#[tokio::test]
async fn documentation_page_success() {
    let base = serve_http(vec![Route::html(
        "/docs/components/button",
        &common::button_page(),
    )])
    .await;
    let upstream = upstream_for(&base);

    let page = upstream.documentation_page("button").await;
    assert_eq!(page, Some(common::button_page()));
}

#[tokio::test]
async fn not_found_is_absent() {
    let base = serve_http(Vec::new()).await;
    let upstream = upstream_for(&base);

    assert!(upstream.documentation_page("nope").await.is_none());
    assert!(upstream.registry_entry("nope").await.is_none());
    assert!(upstream.component_index_page().await.is_none());
}

#[tokio::test]
async fn server_error_is_absent() {
    let base = serve_http(vec![Route {
        path: "/docs/components/button",
        status: 500,
        content_type: "text/plain",
        body: "boom".to_string(),
    }])
    .await;

    assert!(upstream_for(&base)
        .documentation_page("button")
        .await
        .is_none());
}

#[tokio::test]
async fn registry_entry_parsed() {
    let base = serve_http(vec![Route::json("/registry/button.json", BUTTON_ENTRY)]).await;
    let upstream = upstream_for(&base);

    let entry = upstream.registry_entry("button").await.unwrap();
    assert_eq!(entry.dependencies, vec!["@radix-ui/react-slot"]);
    assert_eq!(entry.files.len(), 1);
    assert_eq!(entry.files[0].name.as_deref(), Some("ui/button.tsx"));
}

#[tokio::test]
async fn registry_entry_without_files_is_absent() {
    let base = serve_http(vec![
        Route::json("/registry/empty.json", r#"{"name": "empty", "files": []}"#),
        Route::json("/registry/missing.json", r#"{"name": "missing"}"#),
    ])
    .await;
    let upstream = upstream_for(&base);

    assert!(upstream.registry_entry("empty").await.is_none());
    assert!(upstream.registry_entry("missing").await.is_none());
}

#[tokio::test]
async fn malformed_registry_json_is_absent() {
    let base = serve_http(vec![Route::json("/registry/card.json", "{not json")]).await;
    assert!(upstream_for(&base).registry_entry("card").await.is_none());
}

#[tokio::test]
async fn connection_refused_is_absent() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    assert!(upstream_for(&base)
        .documentation_page("button")
        .await
        .is_none());
}

#[tokio::test]
async fn discovery_uses_live_index_sorted() {
    let base = serve_http(vec![Route::html(
        "/docs/components",
        &common::index_page(),
    )])
    .await;
    let service = ComponentService::new(Arc::new(upstream_for(&base)));

    let components = service.list_components().await;
    let slugs: Vec<_> = components.iter().map(|c| c.slug()).collect();
    assert_eq!(slugs, vec!["accordion", "button", "tabs"]);
    assert_eq!(components[0].url(), format!("{base}/docs/components/accordion"));
}

#[tokio::test]
async fn full_report_over_http_with_missing_source() {
    let base = serve_http(vec![Route::html(
        "/docs/components/button",
        &common::button_page(),
    )])
    .await;
    let service = ComponentService::new(Arc::new(upstream_for(&base)));

    let text = service
        .component_info("button", SectionSelection::All)
        .await;

    assert!(text.starts_with("# Button Documentation"));
    assert!(text.contains("Found 2 code example(s)."));
    assert!(text.contains("Failed to fetch component source code from the registry."));
    assert!(text.contains("npx shadcn@latest add button"));
}

#[tokio::test]
async fn registry_entry_with_null_dependencies() {
    let base = serve_http(vec![Route::json(
        "/registry/button.json",
        r#"{"files": [{"name": "button.tsx", "content": "export {}"}], "dependencies": null}"#,
    )])
    .await;
    let service = ComponentService::new(Arc::new(upstream_for(&base)));

    let text = service
        .component_info(
            "button",
            SectionSelection::Only(shadcn_ui_mcp::shadcn::Section::Source),
        )
        .await;
    assert!(text.starts_with("## Source Code\n\nComponent file: button.tsx"));
}
