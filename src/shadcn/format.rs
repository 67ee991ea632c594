//! Markdown rendering for component records.
//!
//! Two renderings exist per section: a full document served as a resource,
//! and a short summary used by the combined `get-component-info` report.
//! Absent upstream data always renders as a fixed, readable message.

use super::address::{ComponentUri, Section, SectionRecord, MARKDOWN_MIME};
use super::model::{
    capitalize_first, ComponentIdentity, DocumentationRecord, ExampleRecord, InstallationRecord,
    SourceRecord, CLI_INIT_COMMAND,
};

/// MIME type used for degraded messages.
pub const PLAIN_MIME: &str = "text/plain";

/// Separator between blocks of the combined report.
pub const REPORT_SEPARATOR: &str = "\n\n---\n\n";

/// Separator between examples in the examples document.
const EXAMPLE_SEPARATOR: &str = "\n---\n\n";

/// Order of blocks in the combined report.
pub const REPORT_ORDER: [Section; 4] = [
    Section::Documentation,
    Section::Installation,
    Section::Examples,
    Section::Source,
];

/// A rendered resource body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// The body.
    pub text: String,
    /// `text/markdown` for real content, `text/plain` for degraded messages.
    pub mime_type: &'static str,
}

impl RenderedDocument {
    fn markdown(text: String) -> Self {
        Self {
            text,
            mime_type: MARKDOWN_MIME,
        }
    }

    fn plain(text: String) -> Self {
        Self {
            text,
            mime_type: PLAIN_MIME,
        }
    }
}

/// Renders the full resource document for one section.
#[must_use]
pub fn section_document(component: &ComponentIdentity, record: &SectionRecord) -> RenderedDocument {
    let slug = component.slug();
    match record {
        SectionRecord::Documentation(Some(docs)) => {
            RenderedDocument::markdown(documentation_document(component, docs))
        }
        SectionRecord::Documentation(None) => RenderedDocument::plain(format!(
            "Failed to fetch documentation for {slug}. Please check your internet connection."
        )),
        SectionRecord::Examples(examples) if !examples.is_empty() => {
            RenderedDocument::markdown(examples_document(slug, examples))
        }
        SectionRecord::Examples(_) => RenderedDocument::plain(format!(
            "No examples found for {slug}. Visit {} for documentation.",
            component.url()
        )),
        SectionRecord::Source(Some(source)) => {
            RenderedDocument::markdown(source_document(source))
        }
        SectionRecord::Source(None) => RenderedDocument::plain(format!(
            "Failed to fetch source code for {slug} from the registry."
        )),
        SectionRecord::Installation(install) => {
            RenderedDocument::markdown(installation_document(component, install))
        }
    }
}

fn documentation_document(component: &ComponentIdentity, docs: &DocumentationRecord) -> String {
    let slug = component.slug();
    format!(
        "# {name} Component

{description}

## Overview

The {name} component is part of the Shadcn/ui library. Visit the documentation for complete details on usage, props, and examples.

## Documentation URL
{url}

## Installation

```bash
{cli}
```

For complete implementation details, code examples, and API reference, visit the documentation URL above or use the other {slug} resources.
",
        name = docs.name,
        description = docs.description,
        url = component.url(),
        cli = InstallationRecord::for_slug(slug).cli_command,
    )
}

fn examples_document(slug: &str, examples: &[ExampleRecord]) -> String {
    let body = examples
        .iter()
        .enumerate()
        .map(|(index, example)| {
            let mut text = example.title.as_ref().map_or_else(
                || format!("## Example {}\n\n", index + 1),
                |title| format!("## {title}\n\n"),
            );
            if let Some(description) = &example.description {
                text.push_str(description);
                text.push_str("\n\n");
            }
            text.push_str(&format!("```tsx\n{}\n```\n\n", example.code));
            text
        })
        .collect::<Vec<_>>()
        .join(EXAMPLE_SEPARATOR);

    format!("# {} Examples\n\n{body}", capitalize_first(slug))
}

fn source_document(source: &SourceRecord) -> String {
    let mut text = format!("# {}\n\n", source.file_name);
    if !source.imports.is_empty() {
        text.push_str("## Dependencies\n");
        text.push_str(&bullet_list(&source.imports));
        text.push_str("\n\n");
    }
    text.push_str(&format!("## Source Code\n\n```tsx\n{}\n```", source.code));
    text
}

fn installation_document(component: &ComponentIdentity, install: &InstallationRecord) -> String {
    let slug = component.slug();
    let steps = install
        .manual_steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Installing the {name} Component

## CLI Installation (Recommended)

```bash
{cli}
```

## Dependencies

{dependencies}

## Manual Installation Steps

{steps}

## Requirements

- A Next.js, Vite, or similar React project
- Tailwind CSS configured
- Shadcn/ui initialized in your project

If you haven't initialized shadcn/ui yet, run:

```bash
{CLI_INIT_COMMAND}
```

## After Installation

The component will be added to your project in `components/ui/{slug}.tsx`. You can then import and use it:

```tsx
import {{ {import_name} }} from \"@/components/ui/{slug}\"
```

## Documentation

For full usage details, visit: {url}
",
        name = capitalize_first(slug),
        cli = install.cli_command,
        dependencies = bullet_list(&install.dependencies),
        import_name = component.display_name().replace(' ', ""),
        url = component.url(),
    )
}

/// Renders the short summary of one section for the combined report.
#[must_use]
pub fn section_summary(component: &ComponentIdentity, record: &SectionRecord) -> String {
    let slug = component.slug();
    let uri = ComponentUri::new(slug, record.section());
    match record {
        SectionRecord::Documentation(Some(docs)) => format!(
            "# {} Documentation\n\n{}\n\n**URL:** {}\n\nFor full details, see the `{uri}` resource.",
            docs.name,
            docs.description,
            component.url()
        ),
        SectionRecord::Documentation(None) => format!(
            "# {} Documentation\n\nFailed to fetch documentation for {slug}. Please check your internet connection.",
            capitalize_first(slug)
        ),
        SectionRecord::Installation(install) => format!(
            "## Installation\n\n```bash\n{}\n```\n\nFor full installation instructions, see the `{uri}` resource.",
            install.cli_command
        ),
        SectionRecord::Examples(examples) if !examples.is_empty() => format!(
            "## Examples\n\nFound {} code example(s).\n\nSee the `{uri}` resource for full code examples.",
            examples.len()
        ),
        SectionRecord::Examples(_) => format!(
            "## Examples\n\nNo examples found via scraping. Visit {} for documentation.",
            component.url()
        ),
        SectionRecord::Source(Some(source)) => format!(
            "## Source Code\n\nComponent file: {}\n\nSee the `{uri}` resource for the complete implementation.",
            source.file_name
        ),
        SectionRecord::Source(None) => {
            "## Source Code\n\nFailed to fetch component source code from the registry.".to_string()
        }
    }
}

/// Renders the "next steps" block appended to a full report.
#[must_use]
pub fn next_steps(component: &ComponentIdentity) -> String {
    let slug = component.slug();
    format!(
        "## Next Steps

**To implement this component:**
1. Use the `/implement-component component:\"{slug}\"` prompt for step-by-step guidance
2. Run: `{cli}`
3. See examples at: {url}

**For customization help:**
- Use the `/customize-component component:\"{slug}\"` prompt

**For troubleshooting:**
- Use the `/troubleshoot-component component:\"{slug}\"` prompt

**For best practices:**
- Use the `/component-best-practices component:\"{slug}\"` prompt",
        cli = InstallationRecord::for_slug(slug).cli_command,
        url = component.url(),
    )
}

/// Joins section summaries in report order, appending next steps if asked.
///
/// Records may be passed in any order; each is rendered on its own so one
/// missing section never affects another.
#[must_use]
pub fn component_report(
    component: &ComponentIdentity,
    records: &[SectionRecord],
    with_next_steps: bool,
) -> String {
    let mut blocks: Vec<String> = REPORT_ORDER
        .iter()
        .flat_map(|section| records.iter().filter(move |r| r.section() == *section))
        .map(|record| section_summary(component, record))
        .collect();

    if with_next_steps {
        blocks.push(next_steps(component));
    }

    blocks.join(REPORT_SEPARATOR)
}

/// Renders the `list-components` output.
#[must_use]
pub fn component_list(components: &[ComponentIdentity]) -> String {
    if components.is_empty() {
        return "Failed to fetch components list. Please check your internet connection."
            .to_string();
    }

    let lines = components
        .iter()
        .map(|c| format!("- **{}** (`{}`) - {}", c.display_name(), c.slug(), c.url()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Shadcn/ui Components ({count} total)

{lines}

## Usage

To get detailed information about any component, use the `get-component-info` tool with the component slug (e.g., \"button\", \"accordion\", \"dialog\").

For example:
- `get-component-info(\"button\")`
- `get-component-info(\"data-table\")`

Each component can be installed via:
```bash
npx shadcn@latest add [component-slug]
```
",
        count = components.len(),
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
