mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{AnalyzeArgs, Cli, Commands, PaginateArgs, ProcessArgs, SlugArgs, TocArgs, ValidateArgs};
use markdown_text::{
    compute_pagination, extract_headings, extract_html_links, extract_images, extract_links,
    slugify, ArticleProcessor, ContentFetcher, HeadingEntry, MarkdownTextError, PaginationConfig,
    ProcessConfig, Result,
};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Process(args) => handle_process_command(args, &cli.output).await,
        Commands::Toc(args) => handle_toc_command(args).await,
        Commands::Slug(args) => handle_slug_command(args),
        Commands::Paginate(args) => handle_paginate_command(args),
        Commands::Analyze(args) => handle_analyze_command(args).await,
        Commands::Validate(args) => handle_validate_command(args).await,
    };

    if let Err(e) = result {
        error!("Operation failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_process_command(args: &ProcessArgs, output_dir: &Path) -> Result<()> {
    info!("Starting process operation with {} sources", args.sources.len());

    let validated_sources = ContentFetcher::validate_sources(&args.sources).await?;
    info!("Validated {} sources", validated_sources.len());

    // Check if output directory exists and handle force flag
    if output_dir.exists() && !args.force {
        let entries = std::fs::read_dir(output_dir).map_err(|e| {
            MarkdownTextError::OutputDirectory {
                reason: format!("Cannot read output directory: {}", e),
            }
        })?;

        if entries.count() > 0 {
            return Err(MarkdownTextError::OutputDirectory {
                reason: "Output directory is not empty. Use --force to overwrite.".to_string(),
            });
        }
    }

    let config = ProcessConfig {
        article_base_url: args.base_url.trim_end_matches('/').to_string(),
        relative_base: args.relative_base.clone(),
        anchor_before: args.anchor_before,
        rewrite_links: !args.no_rewrite_links,
        include_metadata: args.include_metadata,
        output_dir: output_dir.to_path_buf(),
    };

    let mut written = HashSet::new();

    for (idx, source) in validated_sources.iter().enumerate() {
        info!("Processing source {}/{}: {}", idx + 1, validated_sources.len(), source.source);

        let document = ContentFetcher::fetch_article(source).await?;
        let article = ArticleProcessor::process(&document, &config);
        ArticleProcessor::claim_output(
            &mut written,
            &ArticleProcessor::output_path(&config.output_dir, &article),
        )?;
        let result = ArticleProcessor::write_output(&article, &config).await?;

        info!(
            "  - {} ({} headings, {} links)",
            result.output_file.display(),
            article.toc.as_ref().map_or(0, Vec::len),
            article.link_count
        );

        if let Some(metadata_file) = &result.metadata_file {
            info!("  - {} (metadata)", metadata_file.display());
        }
    }

    info!("Process operation completed successfully!");
    Ok(())
}

fn print_toc(headings: &[HeadingEntry]) {
    for heading in headings {
        let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        println!("{}- [{}](#{})", indent, heading.text, heading.slug);
    }
}

async fn handle_toc_command(args: &TocArgs) -> Result<()> {
    let validated_sources = ContentFetcher::validate_sources(&args.sources).await?;
    let mut tables = BTreeMap::new();

    for source in validated_sources {
        let document = ContentFetcher::fetch_article(&source).await?;
        let toc = extract_headings(&document.content);

        if args.json {
            tables.insert(source.source, toc);
            continue;
        }

        println!("\n=== Table of contents for '{}' ===", document.source);
        match &toc {
            Some(headings) => print_toc(headings),
            None => println!("(no headings)"),
        }
    }

    if args.json {
        println!("{}", toc_json(&tables)?);
    }

    Ok(())
}

/// Tables of contents keyed by source; keys come out sorted.
fn toc_json(tables: &BTreeMap<String, Option<Vec<HeadingEntry>>>) -> Result<String> {
    Ok(serde_json::to_string_pretty(tables)?)
}

fn handle_slug_command(args: &SlugArgs) -> Result<()> {
    for text in &args.text {
        println!("{}", slugify(text));
    }
    Ok(())
}

fn handle_paginate_command(args: &PaginateArgs) -> Result<()> {
    let articles = ContentFetcher::collect_articles(&args.dir)?;

    let config = PaginationConfig {
        base_href: args.base_href.clone(),
        href_template: args.template.clone(),
        per_page: args.per_page,
    };
    let pagination = compute_pagination(articles.len(), args.page.as_str(), &config);

    let page_items: Vec<serde_json::Value> = pagination
        .slice(&articles)
        .iter()
        .map(|path| {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            serde_json::json!({
                "path": path.display().to_string(),
                "href": format!("{}/{}", args.base_href, slugify(stem)),
            })
        })
        .collect();

    if args.json {
        let output = serde_json::json!({
            "pagination": pagination,
            "items": page_items,
            "pages": pagination.page_hrefs(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "\n=== Page {} of {} ({} articles, {} per page) ===",
        pagination.current_page, pagination.total_pages, pagination.total_count, pagination.per_page
    );
    for item in &page_items {
        println!("  {} -> {}", item["path"].as_str().unwrap_or(""), item["href"].as_str().unwrap_or(""));
    }

    if pagination.has_previous() {
        println!("Previous: {}", pagination.href_for(pagination.current_page - 1));
    }
    if pagination.has_next() {
        println!("Next: {}", pagination.href_for(pagination.current_page + 1));
    }

    Ok(())
}

async fn handle_analyze_command(args: &AnalyzeArgs) -> Result<()> {
    info!("Starting analysis of {} sources", args.sources.len());

    let validated_sources = ContentFetcher::validate_sources(&args.sources).await?;
    let mut all_analyses = BTreeMap::new();

    for source in validated_sources {
        info!("Analyzing: {}", source.source);

        let document = ContentFetcher::fetch_article(&source).await?;
        let headings = extract_headings(&document.content);
        let links = extract_links(&document.content);
        let images = extract_images(&document.content);
        let html_links = extract_html_links(&document.content);

        println!("\n=== Analysis for '{}' ===", document.source);
        println!("Source type: {:?}", document.metadata.source_type);
        println!("Total lines: {}", document.metadata.total_lines);
        println!("Headings: {}", headings.as_ref().map_or(0, Vec::len));
        println!("Markdown links: {}", links.len());
        println!("Markdown images: {}", images.len());
        println!("HTML links: {}", html_links.len());

        if args.detailed {
            if let Some(headings) = &headings {
                println!("\nHeadings:");
                print_toc(headings);
            }
            if !links.is_empty() {
                println!("\nLinks:");
                for link in &links {
                    println!("  [{}] -> {}", link.label, link.url);
                }
            }
            if !images.is_empty() {
                println!("\nImages:");
                for image in &images {
                    println!("  [{}] -> {}", image.alt, image.url);
                }
            }
        }

        all_analyses.insert(
            source.source,
            serde_json::json!({
                "metadata": document.metadata,
                "headings": headings,
                "links": links,
                "images": images,
                "html_links": html_links,
            }),
        );
    }

    // Write JSON output if requested
    if let Some(json_path) = &args.json_output {
        let json_content = serde_json::to_string_pretty(&all_analyses)
            .context("Failed to serialize analysis results")?;

        tokio::fs::write(json_path, json_content)
            .await
            .context("Failed to write JSON analysis file")?;

        info!("Analysis results written to: {}", json_path.display());
    }

    Ok(())
}

async fn handle_validate_command(args: &ValidateArgs) -> Result<()> {
    info!("Validating {} sources", args.sources.len());

    let mut valid_sources = Vec::new();
    let mut invalid_sources = Vec::new();

    for source in &args.sources {
        match ContentFetcher::validate_sources(&[source.clone()]).await {
            Ok(expanded) => {
                info!("✓ Valid: {} ({} articles)", source, expanded.len());
                valid_sources.push(source);

                if args.check_access {
                    for article in &expanded {
                        match ContentFetcher::fetch_article(article).await {
                            Ok(document) => {
                                info!(
                                    "  Accessible: {}, {} lines",
                                    article.source, document.metadata.total_lines
                                );
                            }
                            Err(e) => {
                                error!("  Cannot access content: {}", e);
                                invalid_sources.push((source, format!("Access error: {}", e)));
                            }
                        }
                    }
                }
            }
            Err(e) => {
                error!("✗ Invalid: {} - {}", source, e);
                invalid_sources.push((source, e.to_string()));
            }
        }
    }

    println!("\n=== Validation Summary ===");
    println!("Valid sources: {}/{}", valid_sources.len(), args.sources.len());

    if !invalid_sources.is_empty() {
        println!("Invalid sources:");
        let invalid_count = invalid_sources.len();
        for (source, error) in invalid_sources {
            println!("  - {}: {}", source, error);
        }
        return Err(MarkdownTextError::InvalidSource {
            reason: format!("{} sources failed validation", invalid_count),
        });
    }

    println!("All sources are valid!");
    Ok(())
}
