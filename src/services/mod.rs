pub mod fetcher;
pub mod headings;
pub mod links;
pub mod pagination;
pub mod patterns;
pub mod processor;
pub mod slug;

pub use fetcher::ContentFetcher;
pub use headings::{extract_headings, heading_anchors, linkify_headings};
pub use links::{
    absolutize_relative_links, extract_html_links, extract_images, extract_links, resolve_path,
    rewrite_article_links, strip_markdown_extensions,
};
pub use pagination::{compute_pagination, PageRequest, PaginationConfig};
pub use processor::ArticleProcessor;
pub use slug::slugify;
