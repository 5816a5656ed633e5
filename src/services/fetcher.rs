use crate::error::{MarkdownTextError, Result};
use crate::types::{ArticleSource, DocumentMetadata, SourceDocument, SourceType};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;
use walkdir::WalkDir;

/// Extensions picked up when a directory is given as a source.
const ARTICLE_EXTENSIONS: [&str; 2] = ["md", "mdx"];

pub struct ContentFetcher;

impl ContentFetcher {
    pub async fn fetch_content(source: &str) -> Result<SourceDocument> {
        if Self::is_url(source) {
            Self::fetch_from_url(source).await
        } else {
            Self::fetch_from_file(source).await
        }
    }

    /// Fetch a validated source, keeping its output path.
    pub async fn fetch_article(article: &ArticleSource) -> Result<SourceDocument> {
        let mut document = Self::fetch_content(&article.source).await?;
        document.metadata.relative_path = article.relative_path.clone();
        Ok(document)
    }

    async fn fetch_from_url(url: &str) -> Result<SourceDocument> {
        info!("Fetching content from URL: {}", url);

        let parsed_url = Url::parse(url)?;
        let client = reqwest::Client::new();
        let response = client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(MarkdownTextError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let content = response.text().await?;
        let filename = Self::extract_filename_from_url(&parsed_url);

        Ok(Self::document(url, content, filename, SourceType::Url))
    }

    async fn fetch_from_file(file_path: &str) -> Result<SourceDocument> {
        info!("Reading file: {}", file_path);

        let path = Path::new(file_path);

        if !path.exists() {
            return Err(MarkdownTextError::FileNotFound {
                path: file_path.to_string(),
            });
        }

        let content = fs::read_to_string(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self::document(file_path, content, filename, SourceType::LocalFile))
    }

    fn document(
        source: &str,
        content: String,
        filename: String,
        source_type: SourceType,
    ) -> SourceDocument {
        let metadata = DocumentMetadata {
            relative_path: PathBuf::from(&filename),
            filename,
            source_type,
            fetched_at: chrono::Utc::now().to_rfc3339(),
            total_lines: content.lines().count(),
        };

        SourceDocument {
            source: source.to_string(),
            content,
            metadata,
        }
    }

    fn is_url(source: &str) -> bool {
        source.starts_with("http://") || source.starts_with("https://")
    }

    fn extract_filename_from_url(url: &Url) -> String {
        url.path_segments()
            .and_then(|segments| segments.last())
            .and_then(|name| if name.is_empty() { None } else { Some(name) })
            .unwrap_or("downloaded.md")
            .to_string()
    }

    fn is_article(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ARTICLE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }

    /// Every `.md`/`.mdx` file below `dir`, sorted by path.
    pub fn collect_articles(dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(MarkdownTextError::InvalidSource {
                reason: format!("{} is not a directory", dir.display()),
            });
        }

        let mut articles = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_file() && Self::is_article(entry.path()) {
                articles.push(entry.into_path());
            }
        }

        articles.sort();
        debug!("Collected {} articles from {}", articles.len(), dir.display());

        Ok(articles)
    }

    /// Check every source and expand directories into the articles they contain.
    ///
    /// Articles found in a directory keep their path relative to it; other sources are
    /// placed by file name.
    pub async fn validate_sources(sources: &[String]) -> Result<Vec<ArticleSource>> {
        let mut validated = Vec::new();

        for source in sources {
            if Self::is_url(source) {
                let parsed_url = Url::parse(source)?;
                validated.push(ArticleSource {
                    source: source.clone(),
                    relative_path: PathBuf::from(Self::extract_filename_from_url(&parsed_url)),
                });
                continue;
            }

            let path = Path::new(source);
            if path.is_file() {
                let filename = path.file_name().map(PathBuf::from).unwrap_or_default();
                validated.push(ArticleSource {
                    source: source.clone(),
                    relative_path: filename,
                });
            } else if path.is_dir() {
                let articles = Self::collect_articles(path)?;
                if articles.is_empty() {
                    warn!("No markdown articles found in {}", source);
                }
                for article in articles {
                    let relative_path = article
                        .strip_prefix(path)
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|_| article.clone());
                    validated.push(ArticleSource {
                        source: article.to_string_lossy().into_owned(),
                        relative_path,
                    });
                }
            } else {
                return Err(MarkdownTextError::FileNotFound {
                    path: source.clone(),
                });
            }
        }

        Ok(validated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    #[test]
    fn test_is_url() {
        assert!(ContentFetcher::is_url("https://example.com/post.md"));
        assert!(ContentFetcher::is_url("http://example.com"));
        assert!(!ContentFetcher::is_url("./content/post.md"));
    }

    #[test]
    fn test_extract_filename_from_url() {
        let url = Url::parse("https://example.com/articles/intro.md").unwrap();
        assert_eq!(ContentFetcher::extract_filename_from_url(&url), "intro.md");

        let url = Url::parse("https://example.com/articles/").unwrap();
        assert_eq!(ContentFetcher::extract_filename_from_url(&url), "downloaded.md");
    }

    #[test]
    fn test_collect_articles_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::create_dir(dir.path().join("nested")).unwrap();
        std_fs::write(dir.path().join("b.md"), "# B").unwrap();
        std_fs::write(dir.path().join("a.MDX"), "# A").unwrap();
        std_fs::write(dir.path().join("nested/c.md"), "# C").unwrap();
        std_fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let articles = ContentFetcher::collect_articles(dir.path()).unwrap();
        let names: Vec<_> = articles
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.MDX", "b.md", "nested/c.md"]);
    }

    #[test]
    fn test_collect_articles_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("post.md");
        std_fs::write(&file, "# Post").unwrap();

        assert!(matches!(
            ContentFetcher::collect_articles(&file),
            Err(MarkdownTextError::InvalidSource { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("post.md");
        std_fs::write(&file, "# Post\n\nBody\n").unwrap();

        let document = ContentFetcher::fetch_content(file.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(document.metadata.filename, "post.md");
        assert_eq!(document.metadata.source_type, SourceType::LocalFile);
        assert_eq!(document.metadata.total_lines, 3);
        assert!(document.content.starts_with("# Post"));
    }

    #[tokio::test]
    async fn test_validate_sources() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::create_dir(dir.path().join("b")).unwrap();
        std_fs::write(dir.path().join("intro.md"), "# One").unwrap();
        std_fs::write(dir.path().join("b/intro.mdx"), "# Two").unwrap();

        let sources = vec![
            dir.path().to_string_lossy().into_owned(),
            "https://example.com/post.md".to_string(),
        ];
        let validated = ContentFetcher::validate_sources(&sources).await.unwrap();
        let relative: Vec<_> = validated.iter().map(|a| a.relative_path.clone()).collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("b/intro.mdx"),
                PathBuf::from("intro.md"),
                PathBuf::from("post.md"),
            ]
        );
        assert_eq!(validated[2].source, "https://example.com/post.md");

        let document = ContentFetcher::fetch_article(&validated[0]).await.unwrap();
        assert_eq!(document.metadata.filename, "intro.mdx");
        assert_eq!(document.metadata.relative_path, PathBuf::from("b/intro.mdx"));

        let missing = vec![dir.path().join("missing.md").to_string_lossy().into_owned()];
        assert!(matches!(
            ContentFetcher::validate_sources(&missing).await,
            Err(MarkdownTextError::FileNotFound { .. })
        ));
    }
}
