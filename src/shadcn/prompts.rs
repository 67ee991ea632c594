//! Prompt templates.
//!
//! Each template takes a component slug and interpolates it into fixed
//! instructional text. There is no other logic.

use std::str::FromStr;

use super::model::capitalize_first;

/// The available prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Step-by-step implementation guidance.
    Implement,
    /// Styling and behaviour customisation.
    Customize,
    /// Debugging common problems.
    Troubleshoot,
    /// Patterns and best practices.
    BestPractices,
}

impl PromptKind {
    /// Every prompt, in listing order.
    pub const ALL: [Self; 4] = [
        Self::Implement,
        Self::Customize,
        Self::Troubleshoot,
        Self::BestPractices,
    ];

    /// Prompt name as exposed to clients.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Implement => "implement-component",
            Self::Customize => "customize-component",
            Self::Troubleshoot => "troubleshoot-component",
            Self::BestPractices => "component-best-practices",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Implement => "Guide for implementing any Shadcn component",
            Self::Customize => "Help customize any Shadcn component styling and behavior",
            Self::Troubleshoot => "Debug common issues with any Shadcn component",
            Self::BestPractices => "Learn best practices and patterns for any Shadcn component",
        }
    }

    /// Renders the prompt text for `component`.
    #[must_use]
    pub fn render(self, component: &str) -> String {
        let name = capitalize_first(component);
        match self {
            Self::Implement => format!(
                "I want to implement the Shadcn {name} component in my React project. Please guide me through:

1. Installation using the Shadcn CLI
2. Basic usage with a simple example
3. Common props and configuration options
4. Best practices for accessibility

Please provide step-by-step instructions and working code examples for the {component} component."
            ),
            Self::Customize => format!(
                "I have a Shadcn {name} component and I want to customize it. Please help me with:

1. How to modify the styling (colors, borders, spacing, animations)
2. How to control the behavior and interactions
3. How to add custom functionality or variants
4. How to integrate with form state or other React hooks
5. How to make it work with dynamic content

Please provide practical examples showing how to customize the {component} component while maintaining accessibility."
            ),
            Self::Troubleshoot => format!(
                "I'm having issues with my Shadcn {name} component. Please help me troubleshoot common problems:

1. The component is not rendering correctly
2. Styling is not being applied as expected
3. Interactions or animations are not working
4. TypeScript errors with props or types
5. Conflicts with other components or global styles
6. Accessibility issues (keyboard navigation, screen readers)
7. Integration issues with forms or state management

Please provide debugging steps and solutions for common {component} component issues."
            ),
            Self::BestPractices => format!(
                "Please teach me the best practices for using the Shadcn {name} component:

1. **Accessibility**: How to ensure the component is fully accessible (ARIA attributes, keyboard navigation, screen readers)
2. **Performance**: Best practices for optimal performance
3. **UX Patterns**: When and how to use this component effectively
4. **Content Organization**: How to structure content within the component
5. **Responsive Design**: Making it work well on mobile and desktop
6. **Common Use Cases**: Real-world examples and patterns
7. **Integration**: Working with forms, data fetching, and state management

Please provide examples and explain the reasoning behind each best practice for the {component} component."
            ),
        }
    }
}

impl FromStr for PromptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("Unknown prompt: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in PromptKind::ALL {
            assert_eq!(kind.name().parse::<PromptKind>().unwrap(), kind);
        }
        assert!("implement".parse::<PromptKind>().is_err());
    }

    #[test]
    fn render_interpolates_slug() {
        let text = PromptKind::Implement.render("dialog");
        assert!(text.starts_with("I want to implement the Shadcn Dialog component"));
        assert!(text.ends_with("working code examples for the dialog component."));
    }

    #[test]
    fn every_prompt_mentions_component() {
        for kind in PromptKind::ALL {
            assert!(kind.render("hover-card").contains("hover-card"));
        }
    }
}
