//! Compiled regex patterns shared by the markdown text helpers.
//!
//! Patterns compile once on first use through `LazyLock`.

use regex::Regex;
use std::sync::LazyLock;

/// ATX headings of level 1 to 4 (`## Title`), one per line.
pub static MARKDOWN_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?imR)^(#{1,4}) (.*)$").unwrap());

/// Markdown links (`[label](url)`).
///
/// The label is greedy, so an image nested in a link
/// (`[![alt](img_url)](link_url)`) is captured whole and needs a second pass.
pub static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?imR)\[(.*)\]\((.*?)\)").unwrap());

/// Markdown images (`![alt](url)`).
pub static MARKDOWN_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?imR)!\[([^\[\]]+)\]\((.*?)\)").unwrap());

/// `href` values of HTML `a` tags, double or single quoted.
pub static HTML_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?mR)<a\s+(?:[^>]*?\s+)?href=(?:"([^"\r\n]*)"|'([^'\r\n]*)')"#).unwrap()
});

/// `a`/`img` tags whose `href`/`src` value is relative (starts with `/` or `.`).
///
/// Group 1/2 hold the double quote and its value, group 3/4 the single quote and its value.
pub static HTML_RELATIVE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?imR)<(?:a|img)\s+(?:[^>]*?\s+)?(?:href|src)=(?:(")([/|.][^"\r\n]*?)"|(')([/|.][^'\r\n]*?)')"#,
    )
    .unwrap()
});

/// Markdown and HTML file extensions removed from link targets.
pub static FILE_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(?:mdx?|html?)").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_pattern_levels() {
        assert!(MARKDOWN_HEADING_RE.is_match("# One"));
        assert!(MARKDOWN_HEADING_RE.is_match("#### Four"));
        assert!(!MARKDOWN_HEADING_RE.is_match("##### Five"));
        assert!(!MARKDOWN_HEADING_RE.is_match("#NoSpace"));
        assert!(!MARKDOWN_HEADING_RE.is_match("text # not a heading"));
    }

    #[test]
    fn test_heading_pattern_crlf() {
        let caps = MARKDOWN_HEADING_RE.captures("## Title\r\nbody").unwrap();
        assert_eq!(&caps[2], "Title");
    }

    #[test]
    fn test_relative_url_pattern_quotes() {
        let caps = HTML_RELATIVE_URL_RE
            .captures(r#"<img alt="x" src='./pic.png' />"#)
            .unwrap();
        assert_eq!(caps.get(3).map(|m| m.as_str()), Some("'"));
        assert_eq!(caps.get(4).map(|m| m.as_str()), Some("./pic.png"));

        assert!(!HTML_RELATIVE_URL_RE.is_match(r#"<a href="https://example.com">"#));
    }
}
