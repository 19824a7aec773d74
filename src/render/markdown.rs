//! Markdown rendering for text runs.
//!
//! Text runs are authored as markdown. Before indexing they are rendered to
//! HTML and the cleanup pipeline strips the markup again, so the renderer
//! only needs to be faithful about which characters end up as text.

use pulldown_cmark::{html, Options, Parser};

use crate::error::Result;

/// Renders markdown source to text or HTML.
///
/// Implementations must be pure: same input, same output, no side effects.
/// Errors are recovered by the transform's fallback path.
pub trait MarkdownRenderer: Send + Sync {
    /// Render markdown source.
    fn render(&self, source: &str) -> Result<String>;
}

/// Renderer that returns its input untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRenderer;

impl MarkdownRenderer for PassthroughRenderer {
    fn render(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// CommonMark renderer producing HTML.
///
/// Backslash escapes and entities are resolved and attribute values are
/// escaped, so the cleanup pipeline only ever sees well-formed tags. Raw
/// HTML passes through.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer {
    options: Options,
}

impl HtmlRenderer {
    /// Create a renderer for plain CommonMark.
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
        }
    }

    /// Enable parser extensions (tables, strikethrough, ...).
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for HtmlRenderer {
    fn render(&self, source: &str) -> Result<String> {
        let parser = Parser::new_ext(source, self.options);
        let mut output = String::with_capacity(source.len() + source.len() / 2);
        html::push_html(&mut output, parser);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::clean_text;

    fn render(source: &str) -> String {
        HtmlRenderer::new().render(source).unwrap()
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(render("Hello world"), "<p>Hello world</p>\n");
        assert_eq!(render("One\n\nTwo"), "<p>One</p>\n<p>Two</p>\n");
    }

    #[test]
    fn test_heading() {
        assert_eq!(render("## Section title ##"), "<h2>Section title</h2>\n");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            clean_text(&render("- apples\n- pears")),
            "apples pears"
        );
        assert_eq!(
            clean_text(&render("1. first\n2. second")),
            "first second"
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(clean_text(&render("> quoted\n> text")), "quoted text");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            render("**bold** and *italic* and `code`"),
            "<p><strong>bold</strong> and <em>italic</em> and <code>code</code></p>\n"
        );
        assert_eq!(
            clean_text(&render("see [docs](https://example.com \"Docs\")")),
            "see docs"
        );
    }

    #[test]
    fn test_backslash_escapes() {
        let html = render("a \\*literal\\* star and 1\\. item");
        assert!(!html.contains("<em>"));
        assert_eq!(clean_text(&html), "a *literal* star and 1. item");
    }

    #[test]
    fn test_attribute_values_escaped() {
        assert_eq!(clean_text(&render("see [docs](https://x.io/a>b)")), "see docs");
        assert_eq!(clean_text(&render("![a > b](cat.png) caption")), "caption");
        assert_eq!(
            clean_text(&render(r#"[quoted](https://x.io "say \"hi\" > bye")"#)),
            "quoted"
        );
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(clean_text(&render("Fish &amp; chips")), "Fish & chips");
    }

    #[test]
    fn test_raw_html_passes_through() {
        assert_eq!(render("<b>bold</b> text"), "<p><b>bold</b> text</p>\n");
    }

    #[test]
    fn test_snake_case_is_not_emphasis() {
        assert_eq!(render("snake_case_name"), "<p>snake_case_name</p>\n");
    }

    #[test]
    fn test_tables_need_extension() {
        let source = "| a | b |\n|---|---|\n| 1 | 2 |";
        assert!(!render(source).contains("<table>"));

        let html = HtmlRenderer::new()
            .with_options(Options::ENABLE_TABLES)
            .render(source)
            .unwrap();
        assert!(html.contains("<table>"));
        assert_eq!(clean_text(&html), "a b 1 2");
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n \n"), "");
    }
}
