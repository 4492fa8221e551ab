//! Rich-content cleaner for mirrored page-builder HTML.
//!
//! Fragments copied from the mirror are wrapped in several levels of
//! Beaver-Builder grid markup and interleaved with template widgets that are
//! never article content. Cleaning is two-phase: first locate the actual
//! rich-text blocks by structural marker, then serialize only those while
//! unwrapping builder wrappers, dropping template blocks, and rewriting
//! lazy-load image placeholders. Locating happens before unwrapping because
//! flattening the wrappers first would destroy the structure the locator
//! needs.

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Elements removed entirely, regardless of content.
const DROP_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "iframe", "form",
];

/// Class-token substrings marking template blocks that are never content:
/// shared CTAs, menu widgets, post navigation, separators, sliders.
const DROP_CLASS_PATTERNS: &[&str] = &[
    "fl-cta",
    "pp-cta",
    "fl-menu",
    "pp-advanced-menu",
    "fl-post-nav",
    "post-navigation",
    "fl-separator",
    "fl-slideshow",
    "fl-slider",
    "fl-carousel",
    "pp-carousel",
    "fl-builder-pagination",
];

/// Builder wrapper class-token prefixes. Matching elements are unwrapped:
/// the tag disappears, the children stay.
const UNWRAP_CLASS_PREFIXES: &[&str] = &[
    "fl-builder-content",
    "fl-row",
    "fl-col",
    "fl-module",
    "fl-node",
    "fl-rich-text",
];

/// Attributes kept on output, emitted in this fixed order so cleaned
/// fragments are byte-stable across runs.
const KEEP_ATTRS: &[&str] = &[
    "href", "src", "srcset", "alt", "title", "target", "rel", "width", "height", "colspan",
    "rowspan",
];

/// Block-level tags dropped when cleaning leaves them empty.
const EMPTY_DROP_TAGS: &[&str] = &[
    "div",
    "p",
    "section",
    "article",
    "aside",
    "ul",
    "ol",
    "li",
    "figure",
    "figcaption",
    "blockquote",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
];

/// Void elements (no closing tag).
const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "source", "col", "embed", "wbr"];

/// Tags that end a line in the output, to keep cleaned fragments readable.
const NEWLINE_AFTER: &[&str] = &[
    "p", "div", "section", "article", "ul", "ol", "li", "figure", "blockquote", "h1", "h2", "h3",
    "h4", "h5", "h6", "table", "tr", "br", "hr",
];

pub struct Sanitizer {
    content_blocks: Selector,
    content_fallback: Selector,
    body: Selector,
    squeeze_newlines: Regex,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        Self {
            content_blocks: Selector::parse(".fl-rich-text").expect("static selector"),
            content_fallback: Selector::parse(".fl-module-content").expect("static selector"),
            body: Selector::parse("body").expect("static selector"),
            squeeze_newlines: Regex::new(r"\n{3,}").expect("static regex"),
        }
    }

    /// Clean a whole mirrored document into a body fragment.
    ///
    /// Content blocks are located by the primary marker, then the secondary
    /// one; when neither matches, the entire body is cleaned as a last
    /// resort (recognizable downstream by its unusually large output).
    pub fn clean_document(&self, document: &Html) -> String {
        let mut blocks = top_level_matches(document, &self.content_blocks);
        if blocks.is_empty() {
            blocks = top_level_matches(document, &self.content_fallback);
        }
        if blocks.is_empty() {
            blocks = document.select(&self.body).collect();
        }
        let mut out = String::new();
        for block in blocks {
            self.render_children(block, &mut out);
            out.push('\n');
        }
        self.finish(out)
    }

    /// Clean one already-located fragment (children of `root`).
    pub fn clean_fragment(&self, root: ElementRef) -> String {
        let mut out = String::new();
        self.render_children(root, &mut out);
        self.finish(out)
    }

    fn finish(&self, out: String) -> String {
        self.squeeze_newlines
            .replace_all(&out, "\n\n")
            .trim()
            .to_string()
    }

    fn render_children(&self, el: ElementRef, out: &mut String) {
        for child in el.children() {
            match child.value() {
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        self.render_element(child_el, out);
                    }
                }
                // Comments and everything else are template noise.
                _ => {}
            }
        }
    }

    fn render_element(&self, el: ElementRef, out: &mut String) {
        let tag = el.value().name();

        if DROP_TAGS.contains(&tag) || has_drop_class(el) {
            return;
        }
        if should_unwrap(el) {
            self.render_children(el, out);
            return;
        }

        if VOID_TAGS.contains(&tag) {
            out.push('<');
            out.push_str(tag);
            push_attrs(el, out);
            out.push_str(">");
            if NEWLINE_AFTER.contains(&tag) {
                out.push('\n');
            }
            return;
        }

        // Render children first so blocks emptied by cleaning can be
        // dropped instead of emitted as hollow tags.
        let mut inner = String::new();
        self.render_children(el, &mut inner);
        if EMPTY_DROP_TAGS.contains(&tag) && inner.trim().is_empty() {
            return;
        }

        out.push('<');
        out.push_str(tag);
        push_attrs(el, out);
        out.push('>');
        out.push_str(&inner);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        if NEWLINE_AFTER.contains(&tag) {
            out.push('\n');
        }
    }
}

/// Emit the kept attributes in canonical order, applying the lazy-load
/// rewrites: `data-src` becomes the real `src` (replacing any placeholder)
/// and `data-srcset` becomes `srcset`.
fn push_attrs(el: ElementRef, out: &mut String) {
    let value = el.value();
    let lazy_src = value.attr("data-src").or_else(|| value.attr("data-lazy-src"));
    let lazy_srcset = value
        .attr("data-srcset")
        .or_else(|| value.attr("data-lazy-srcset"));

    for name in KEEP_ATTRS {
        let attr_value = match *name {
            "src" => lazy_src.or_else(|| value.attr("src")),
            "srcset" => lazy_srcset.or_else(|| value.attr("srcset")),
            other => value.attr(other),
        };
        if let Some(attr_value) = attr_value {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(attr_value));
            out.push('"');
        }
    }
}

/// Matches for `selector` that are not nested inside another match, so a
/// rich-text block containing another never doubles its content.
fn top_level_matches<'a>(document: &'a Html, selector: &Selector) -> Vec<ElementRef<'a>> {
    document
        .select(selector)
        .filter(|el| {
            !el.ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| selector.matches(&ancestor))
        })
        .collect()
}

fn has_drop_class(el: ElementRef) -> bool {
    el.value().classes().any(|token| {
        DROP_CLASS_PATTERNS
            .iter()
            .any(|pattern| token.contains(pattern))
    })
}

fn should_unwrap(el: ElementRef) -> bool {
    el.value().classes().any(|token| {
        UNWRAP_CLASS_PREFIXES
            .iter()
            .any(|prefix| token.starts_with(prefix))
    })
}

/// Escape text content for re-serialization.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value (double-quoted context).
fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(html: &str) -> String {
        let document = Html::parse_document(html);
        Sanitizer::new().clean_document(&document)
    }

    #[test]
    fn strips_scripts_and_styles() {
        let out = clean(
            "<body><div class=\"fl-rich-text\"><p>Keep</p>\
             <script>alert(1)</script><style>p{}</style></div></body>",
        );
        assert!(out.contains("<p>Keep</p>"));
        assert!(!out.contains("script"));
        assert!(!out.contains("style"));
    }

    #[test]
    fn removes_template_blocks() {
        let out = clean(
            "<body><div class=\"fl-rich-text\"><p>Body</p>\
             <div class=\"fl-cta-wrap\"><p>Call now!</p></div>\
             <div class=\"fl-post-nav\"><a href=\"/x\">Next</a></div></div></body>",
        );
        assert!(out.contains("Body"));
        assert!(!out.contains("Call now!"));
        assert!(!out.contains("Next"));
    }

    #[test]
    fn unwraps_builder_grid() {
        let out = clean(
            "<body><div class=\"fl-rich-text\">\
             <div class=\"fl-row\"><div class=\"fl-col\"><p>Deep</p></div></div>\
             </div></body>",
        );
        assert_eq!(out, "<p>Deep</p>");
    }

    #[test]
    fn rewrites_lazy_images() {
        let out = clean(
            "<body><div class=\"fl-rich-text\">\
             <img src=\"data:image/svg+xml;nothing\" data-src=\"https://x.test/real.jpg\" \
             data-srcset=\"https://x.test/real.jpg 1024w\" alt=\"m\"></div></body>",
        );
        assert!(out.contains("src=\"https://x.test/real.jpg\""));
        assert!(out.contains("srcset=\"https://x.test/real.jpg 1024w\""));
        assert!(!out.contains("svg+xml"));
    }

    #[test]
    fn drops_emptied_blocks() {
        let out = clean(
            "<body><div class=\"fl-rich-text\"><p>Text</p>\
             <div><script>gone()</script></div><p>  </p></div></body>",
        );
        assert!(!out.contains("<div>"));
        assert_eq!(out.matches("<p>").count(), 1);
    }

    #[test]
    fn falls_back_to_secondary_marker_then_body() {
        let secondary = clean(
            "<body><div class=\"fl-module-content\"><p>Second</p></div></body>",
        );
        assert_eq!(secondary, "<p>Second</p>");

        let whole = clean("<body><main><p>Everything</p></main></body>");
        assert!(whole.contains("Everything"));
    }

    #[test]
    fn collapses_newline_runs() {
        let out = clean(
            "<body><div class=\"fl-rich-text\"><p>a</p>\
             <div class=\"fl-separator\"></div>\
             <div class=\"fl-separator\"></div>\
             <p>b</p></div></body>",
        );
        assert!(!out.contains("\n\n\n"));
    }

    #[test]
    fn escapes_text_entities() {
        let out = clean("<body><div class=\"fl-rich-text\"><p>5 &lt; 6 &amp; more</p></div></body>");
        assert!(out.contains("5 &lt; 6 &amp; more"));
    }
}
