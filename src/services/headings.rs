use crate::services::patterns::{MARKDOWN_HEADING_RE, MARKDOWN_LINK_RE};
use crate::services::slug::slugify;
use crate::types::HeadingEntry;
use regex::Captures;
use tracing::trace;

/// Build a table of contents from the level 1-4 headings of a markdown document.
///
/// Links inside a heading (including the `[#](#slug)` self-link added by
/// [`linkify_headings`]) are stripped before the label is read. Returns `None` when
/// the document has no heading at all, so callers can tell "no TOC" apart from an
/// empty one. Identical labels produce identical slugs.
pub fn extract_headings(markdown: &str) -> Option<Vec<HeadingEntry>> {
    let entries: Vec<HeadingEntry> = MARKDOWN_HEADING_RE
        .captures_iter(markdown)
        .map(|caps| heading_entry(&caps))
        .collect();

    trace!("Found {} headings", entries.len());

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

fn heading_entry(caps: &Captures) -> HeadingEntry {
    let without_links = MARKDOWN_LINK_RE.replace_all(&caps[0], "");

    // A heading made only of a link has nothing left to match once the link is gone.
    let (level, text) = match MARKDOWN_HEADING_RE.captures(without_links.trim()) {
        Some(stripped) => (
            stripped[1].len(),
            stripped.get(2).map_or("", |m| m.as_str()).to_string(),
        ),
        None => (caps[1].len(), String::new()),
    };

    HeadingEntry {
        level: level as u8,
        slug: slugify(&text),
        text,
    }
}

/// Give every level 1-4 heading an addressable anchor and a trailing `[#](#slug)` self-link.
///
/// The `<a id="slug" />` anchor is emitted on its own line directly above the heading.
/// `_anchor_before` does not change that placement; it is accepted so callers written
/// against the two-argument form keep compiling.
pub fn linkify_headings(markdown: &str, _anchor_before: bool) -> String {
    MARKDOWN_HEADING_RE
        .replace_all(markdown, |caps: &Captures| {
            let hashes = &caps[1];
            let label = heading_label(caps);
            let slug = slugify(label);

            format!("<a id=\"{slug}\" />\n{hashes} {label} [#](#{slug})")
        })
        .into_owned()
}

fn heading_label<'h>(caps: &Captures<'h>) -> &'h str {
    caps.get(2).map_or("", |m| m.as_str())
}

/// The anchor ids [`linkify_headings`] gives each heading of `markdown`, in document order.
///
/// Unlike [`extract_headings`], links in the label are slugged along with the rest of it.
pub fn heading_anchors(markdown: &str) -> Vec<String> {
    MARKDOWN_HEADING_RE
        .captures_iter(markdown)
        .map(|caps| slugify(heading_label(&caps)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: u8, text: &str, slug: &str) -> HeadingEntry {
        HeadingEntry {
            level,
            text: text.to_string(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn test_extract_headings_none_without_headings() {
        assert_eq!(extract_headings(""), None);
        assert_eq!(extract_headings("plain text\nmore text"), None);
        assert_eq!(extract_headings("#hashtag without space"), None);
        assert_eq!(extract_headings("##### too deep"), None);
    }

    #[test]
    fn test_extract_headings_document_order() {
        let markdown = "# Title\n\nintro\n\n## First Section\ntext\n### Deeper\n#### Deepest\n##### Ignored";
        let headings = extract_headings(markdown).unwrap();

        assert_eq!(
            headings,
            vec![
                entry(1, "Title", "title"),
                entry(2, "First Section", "first-section"),
                entry(3, "Deeper", "deeper"),
                entry(4, "Deepest", "deepest"),
            ]
        );
    }

    #[test]
    fn test_extract_headings_strips_links() {
        let headings = extract_headings("# Hello [link](url)").unwrap();
        assert_eq!(headings, vec![entry(1, "Hello", "hello")]);
    }

    #[test]
    fn test_extract_headings_duplicates_share_slug() {
        let headings = extract_headings("## Setup\n## Setup").unwrap();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].slug, "setup");
        assert_eq!(headings[1].slug, "setup");
    }

    #[test]
    fn test_extract_headings_link_only_heading() {
        let headings = extract_headings("### [Docs](https://example.com)").unwrap();
        assert_eq!(headings, vec![entry(3, "", "")]);
    }

    #[test]
    fn test_extract_headings_crlf() {
        let headings = extract_headings("# One\r\n## Two\r\n").unwrap();
        assert_eq!(headings, vec![entry(1, "One", "one"), entry(2, "Two", "two")]);
    }

    #[test]
    fn test_linkify_headings() {
        let markdown = "# Hello World\n\nSome text.\n\n## Next Step";
        let linked = linkify_headings(markdown, false);

        assert_eq!(
            linked,
            "<a id=\"hello-world\" />\n# Hello World [#](#hello-world)\n\nSome text.\n\n\
             <a id=\"next-step\" />\n## Next Step [#](#next-step)"
        );
    }

    #[test]
    fn test_linkify_headings_anchor_flag_has_no_effect() {
        let markdown = "### Café Notes";
        assert_eq!(linkify_headings(markdown, true), linkify_headings(markdown, false));
        assert_eq!(
            linkify_headings(markdown, true),
            "<a id=\"cafe-notes\" />\n### Café Notes [#](#cafe-notes)"
        );
    }

    #[test]
    fn test_linkify_leaves_other_lines() {
        let markdown = "text only\n##### five\n#tag";
        assert_eq!(linkify_headings(markdown, false), markdown);
    }

    #[test]
    fn test_heading_anchors_match_linkified_ids() {
        let markdown = "# Intro\n## Using [serde](serde.md)\ntext";
        let anchors = heading_anchors(markdown);
        assert_eq!(anchors, vec!["intro", "using-serdeserdemd"]);

        let linked = linkify_headings(markdown, false);
        for anchor in &anchors {
            assert!(linked.contains(&format!("<a id=\"{anchor}\" />")), "missing {anchor}");
        }
        assert!(heading_anchors("no headings").is_empty());
    }

    #[test]
    fn test_toc_of_linkified_document_ignores_self_links() {
        let linked = linkify_headings("## Getting Started", false);
        let headings = extract_headings(&linked).unwrap();
        assert_eq!(headings, vec![entry(2, "Getting Started", "getting-started")]);
    }
}
