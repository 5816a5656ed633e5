use crate::error::{MarkdownTextError, Result};
use crate::services::headings::{extract_headings, heading_anchors, linkify_headings};
use crate::services::links::{
    absolutize_relative_links, extract_images, extract_links, rewrite_article_links,
};
use crate::types::{HeadingEntry, ProcessConfig, ProcessResult, ProcessedArticle, SourceDocument};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

pub struct ArticleProcessor;

impl ArticleProcessor {
    /// Prepare an article for rendering: anchor its headings, build its table of
    /// contents, and point its links at the published site.
    pub fn process(document: &SourceDocument, config: &ProcessConfig) -> ProcessedArticle {
        debug!("Processing article: {}", document.source);

        let link_count = extract_links(&document.content).len();
        let image_count = extract_images(&document.content).len();

        let mut content = document.content.clone();

        // Links are rewritten before headings gain their `[#](#slug)` self-links.
        if config.rewrite_links {
            content = rewrite_article_links(&content, &config.article_base_url);
        }

        if let Some(base) = &config.relative_base {
            content = absolutize_relative_links(&content, base);
        }

        let anchors = heading_anchors(&content);
        let content = linkify_headings(&content, config.anchor_before);

        // TOC entries point at the anchors written above each heading.
        let toc = extract_headings(&content).map(|entries| {
            entries
                .into_iter()
                .zip(anchors)
                .map(|(entry, anchor)| HeadingEntry {
                    slug: anchor,
                    ..entry
                })
                .collect::<Vec<_>>()
        });

        debug!(
            "Article '{}': {} headings, {} links, {} images",
            document.source,
            toc.as_ref().map_or(0, Vec::len),
            link_count,
            image_count
        );

        ProcessedArticle {
            source: document.source.clone(),
            content,
            toc,
            link_count,
            image_count,
            metadata: document.metadata.clone(),
        }
    }

    /// Where `article` is written under `output_dir`: its relative path, extension
    /// included, so `intro.md` and `intro.mdx` stay apart. Paths without an extension
    /// get `.md`.
    pub fn output_path(output_dir: &Path, article: &ProcessedArticle) -> PathBuf {
        let mut relative = article.metadata.relative_path.clone();
        if relative.as_os_str().is_empty() {
            relative = PathBuf::from("article.md");
        } else if relative.extension().is_none() {
            relative.set_extension("md");
        }
        output_dir.join(relative)
    }

    /// Record `output_file` as written in this run; a second article aimed at the same
    /// file is an error rather than a silent overwrite.
    pub fn claim_output(written: &mut HashSet<PathBuf>, output_file: &Path) -> Result<()> {
        if !written.insert(output_file.to_path_buf()) {
            return Err(MarkdownTextError::OutputDirectory {
                reason: format!(
                    "{} would be written twice in one run",
                    output_file.display()
                ),
            });
        }
        Ok(())
    }

    pub async fn write_output(
        article: &ProcessedArticle,
        config: &ProcessConfig,
    ) -> Result<ProcessResult> {
        let output_file = Self::output_path(&config.output_dir, article);
        let output_parent = output_file.parent().unwrap_or(config.output_dir.as_path());
        Self::ensure_output_directory(output_parent).await?;

        fs::write(&output_file, &article.content).await.map_err(|e| {
            MarkdownTextError::OutputDirectory {
                reason: format!("Failed to write article {}: {}", output_file.display(), e),
            }
        })?;

        let metadata_file = if config.include_metadata {
            let metadata_path = Self::generate_metadata_filename(&output_file);
            Self::write_metadata_file(&metadata_path, article).await?;
            Some(metadata_path)
        } else {
            None
        };

        info!("Wrote processed article: {}", output_file.display());

        Ok(ProcessResult {
            output_file,
            metadata_file,
        })
    }

    async fn ensure_output_directory(output_dir: &Path) -> Result<()> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir).await.map_err(|e| {
                MarkdownTextError::OutputDirectory {
                    reason: format!("Failed to create output directory: {}", e),
                }
            })?;
            info!("Created output directory: {}", output_dir.display());
        }
        Ok(())
    }

    fn generate_metadata_filename(output_file: &Path) -> PathBuf {
        let name = output_file
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("article");
        output_file.with_file_name(format!("{}.metadata.json", name))
    }

    async fn write_metadata_file(metadata_path: &Path, article: &ProcessedArticle) -> Result<()> {
        let metadata = serde_json::json!({
            "source": article.source,
            "toc": article.toc,
            "link_count": article.link_count,
            "image_count": article.image_count,
            "document_metadata": article.metadata,
        });

        let json_content = serde_json::to_string_pretty(&metadata)?;

        fs::write(metadata_path, json_content).await.map_err(|e| {
            MarkdownTextError::OutputDirectory {
                reason: format!("Failed to write metadata file: {}", e),
            }
        })?;

        info!("Generated metadata file: {}", metadata_path.display());
        Ok(())
    }
}
