use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One ATX heading found in markdown source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

/// A markdown link (`[label](url)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownLink {
    pub label: String,
    pub url: String,
}

/// A markdown image (`![alt](url)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownImage {
    pub alt: String,
    pub url: String,
}

/// Everything a listing page needs to render navigation and slice its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDescriptor {
    pub total_count: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub base_href: String,
    pub href_template: String,
    pub slice_start: usize,
    pub slice_end: usize,
}

/// A source to fetch, with the path its output is written under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub source: String,
    pub relative_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub source: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub filename: String,
    pub relative_path: PathBuf,
    pub source_type: SourceType,
    pub fetched_at: String,
    pub total_lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    LocalFile,
    Url,
}

#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub article_base_url: String,
    pub relative_base: Option<String>,
    pub anchor_before: bool,
    pub rewrite_links: bool,
    pub include_metadata: bool,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedArticle {
    pub source: String,
    pub content: String,
    pub toc: Option<Vec<HeadingEntry>>,
    pub link_count: usize,
    pub image_count: usize,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub output_file: PathBuf,
    pub metadata_file: Option<PathBuf>,
}
