//! # Markdown Text Library
//!
//! Text helpers for preparing markdown articles for a website: heading anchors and
//! tables of contents, slug generation, link rewriting against a published base URL,
//! relative path resolution and pagination math.
//!
//! Every text helper is a pure function that never fails; malformed input comes back
//! unchanged. Fetching sources and writing processed articles is handled by
//! [`ContentFetcher`] and [`ArticleProcessor`].
//!
//! ## Example Usage
//!
//! ```rust
//! use markdown_text::{compute_pagination, extract_headings, linkify_headings, PaginationConfig};
//!
//! let markdown = "# Getting Started\n\nSome text.\n\n## Install";
//!
//! let toc = extract_headings(markdown).unwrap();
//! assert_eq!(toc[1].slug, "install");
//!
//! let linked = linkify_headings(markdown, false);
//! assert!(linked.starts_with("<a id=\"getting-started\" />\n# Getting Started [#](#getting-started)"));
//!
//! let pagination = compute_pagination(25, "3", &PaginationConfig { per_page: 10, ..Default::default() });
//! assert_eq!((pagination.slice_start, pagination.slice_end), (20, 30));
//! ```

pub mod error;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use error::{MarkdownTextError, Result};
pub use services::{
    absolutize_relative_links, compute_pagination, extract_headings, extract_html_links,
    extract_images, extract_links, heading_anchors, linkify_headings, resolve_path,
    rewrite_article_links, slugify, strip_markdown_extensions, ArticleProcessor, ContentFetcher,
    PageRequest, PaginationConfig,
};
pub use types::{
    ArticleSource, DocumentMetadata, HeadingEntry, MarkdownImage, MarkdownLink, PaginationDescriptor,
    ProcessConfig, ProcessResult, ProcessedArticle, SourceDocument, SourceType,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
