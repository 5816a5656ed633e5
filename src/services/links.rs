use crate::services::patterns::{
    FILE_EXTENSION_RE, HTML_LINK_RE, HTML_RELATIVE_URL_RE, MARKDOWN_IMAGE_RE, MARKDOWN_LINK_RE,
};
use crate::types::{MarkdownImage, MarkdownLink};
use regex::Captures;

/// Deepest image-in-link nesting that is still rewritten.
const MAX_LINK_NESTING: usize = 8;

/// Remove every `.md`, `.mdx`, `.htm` and `.html` extension (any case) from a link target.
pub fn strip_markdown_extensions(url: &str) -> String {
    FILE_EXTENSION_RE.replace_all(url, "").into_owned()
}

/// Point every markdown link `[label](url)` at `<base_url>/<url>`, minus file extensions.
///
/// A label that is itself an image (`[![alt](img)](url)`) is rewritten first, then the
/// outer link. Matches with an empty label or url are left as they are.
pub fn rewrite_article_links(markdown: &str, base_url: &str) -> String {
    rewrite_links_nested(markdown, base_url, 0)
}

fn rewrite_links_nested(markdown: &str, base_url: &str, depth: usize) -> String {
    MARKDOWN_LINK_RE
        .replace_all(markdown, |caps: &Captures| {
            let label = caps.get(1).map_or("", |m| m.as_str());
            let url = caps.get(2).map_or("", |m| m.as_str());

            if label.is_empty() || url.is_empty() {
                return caps[0].to_string();
            }

            let label = match label.strip_prefix('!') {
                Some(image) if depth < MAX_LINK_NESTING => {
                    rewrite_links_nested(image, base_url, depth + 1)
                }
                _ => label.to_string(),
            };

            format!("[{label}]({base_url}/{})", strip_markdown_extensions(url))
        })
        .into_owned()
}

/// Resolve relative `href`/`src` values of HTML `a` and `img` tags against `base`.
///
/// Only the attribute value changes; the rest of the tag and the surrounding text are
/// copied through untouched.
pub fn absolutize_relative_links(markdown: &str, base: &str) -> String {
    HTML_RELATIVE_URL_RE
        .replace_all(markdown, |caps: &Captures| {
            let whole = &caps[0];
            let offset = caps.get(0).map_or(0, |m| m.start());

            let value = match caps.get(2).or_else(|| caps.get(4)) {
                Some(value) if !value.as_str().is_empty() => value,
                _ => return whole.to_string(),
            };

            let resolved = resolve_path(base, &strip_markdown_extensions(value.as_str()));
            let start = value.start() - offset;
            let end = value.end() - offset;

            format!("{}{}{}", &whole[..start], resolved, &whole[end..])
        })
        .into_owned()
}

/// Join a relative path onto `base`, treating the last segment of `base` as a file name.
///
/// A rooted `relative` whose first directory repeats the last directory of `base`
/// (`/articles/img.png` against `/articles/post`) has that directory collapsed.
/// `..` past the start of `base` is ignored.
///
/// ```
/// use markdown_text::resolve_path;
///
/// assert_eq!(resolve_path("a/b/c", "../d"), "a/d");
/// assert_eq!(resolve_path("a/b/c", "./d"), "a/b/d");
/// assert_eq!(resolve_path("a/b", "../../../x"), "x");
/// ```
pub fn resolve_path(base: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').collect();
    segments.pop();

    let mut parts: Vec<&str> = relative.split('/').collect();
    if parts.len() > 1 && parts[0].is_empty() && segments.last().copied() == Some(parts[1]) {
        parts.remove(1);
    }

    for part in parts {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(part),
        }
    }

    segments.join("/")
}

/// All markdown links in document order.
pub fn extract_links(markdown: &str) -> Vec<MarkdownLink> {
    MARKDOWN_LINK_RE
        .captures_iter(markdown)
        .map(|caps| MarkdownLink {
            label: caps[1].to_string(),
            url: caps[2].to_string(),
        })
        .collect()
}

/// All markdown images in document order. Images with an empty alt text are skipped.
pub fn extract_images(markdown: &str) -> Vec<MarkdownImage> {
    MARKDOWN_IMAGE_RE
        .captures_iter(markdown)
        .map(|caps| MarkdownImage {
            alt: caps[1].to_string(),
            url: caps[2].to_string(),
        })
        .collect()
}

/// `href` values of every HTML anchor tag.
pub fn extract_html_links(html: &str) -> Vec<String> {
    HTML_LINK_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}
