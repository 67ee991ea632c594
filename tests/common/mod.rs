//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use shadcn_ui_mcp::shadcn::model::{RegistryEntry, RegistryFile};
use shadcn_ui_mcp::shadcn::{ComponentService, Upstream};

pub const DOCS_BASE: &str = "https://ui.shadcn.com";

/// In-memory upstream. Anything not registered is reported as unavailable.
#[derive(Default)]
pub struct FakeUpstream {
    pub pages: HashMap<String, String>,
    pub registry: HashMap<String, RegistryEntry>,
    pub index: Option<String>,
    pub page_fetches: AtomicUsize,
}

impl FakeUpstream {
    pub fn with_page(mut self, slug: &str, html: &str) -> Self {
        self.pages.insert(slug.to_string(), html.to_string());
        self
    }

    pub fn with_source(mut self, slug: &str, file_name: &str, code: &str, deps: &[&str]) -> Self {
        self.registry.insert(
            slug.to_string(),
            RegistryEntry {
                files: vec![RegistryFile {
                    name: Some(file_name.to_string()),
                    content: Some(code.to_string()),
                }],
                dependencies: deps.iter().map(ToString::to_string).collect(),
            },
        );
        self
    }

    pub fn with_index(mut self, html: &str) -> Self {
        self.index = Some(html.to_string());
        self
    }

    pub fn into_service(self) -> ComponentService {
        ComponentService::new(Arc::new(self))
    }
}

#[async_trait]
impl Upstream for FakeUpstream {
    fn docs_base(&self) -> &str {
        DOCS_BASE
    }

    async fn documentation_page(&self, slug: &str) -> Option<String> {
        self.page_fetches.fetch_add(1, Ordering::SeqCst);
        self.pages.get(slug).cloned()
    }

    async fn registry_entry(&self, slug: &str) -> Option<RegistryEntry> {
        self.registry
            .get(slug)
            .filter(|entry| !entry.files.is_empty())
            .cloned()
    }

    async fn component_index_page(&self) -> Option<String> {
        self.index.clone()
    }
}

/// A canned response for one request path.
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Route {
    pub fn html(path: &'static str, body: &str) -> Self {
        Self {
            path,
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.to_string(),
        }
    }

    pub fn json(path: &'static str, body: &str) -> Self {
        Self {
            path,
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        }
    }
}

/// Serves `routes` over plain HTTP on a local port and returns the base URL.
///
/// Unknown paths get a 404. Every connection is closed after one response.
pub async fn serve_http(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let routes = Arc::clone(&routes);

            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&request);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, content_type, body) = routes
                    .iter()
                    .find(|route| route.path == path)
                    .map_or((404, "text/plain", "Not Found".to_string()), |route| {
                        (route.status, route.content_type, route.body.clone())
                    });

                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {len}\r\nConnection: close\r\n\r\n{body}",
                    reason = if status == 200 { "OK" } else { "Error" },
                    len = body.len(),
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// A component page with a description and two code blocks.
pub fn button_page() -> String {
    r#"<html><head>
<meta name="description" content="Displays a button or a component that looks like a button.">
</head><body>
<pre class="language-tsx"><code class="language-tsx">import { Button } from "@/components/ui/button"</code></pre>
<p>Usage</p>
<pre><code>&lt;Button variant=&quot;outline&quot;&gt;Button&lt;/Button&gt;</code></pre>
</body></html>"#
        .to_string()
}

/// An index page linking a few components plus some non-component pages.
pub fn index_page() -> String {
    r##"<nav>
<a href="/docs/components/tabs">Tabs</a>
<a href="/docs/components/accordion">Accordion</a>
<a href="/docs/components/button">Button</a>
<a href="/docs/components/button#usage">Button usage</a>
<a href="/docs/components/installation">Installation</a>
<a href="/docs/components/index">Index</a>
<a href="/docs/components/tabs">Tabs again</a>
</nav>"##
        .to_string()
}
