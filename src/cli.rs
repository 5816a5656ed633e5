use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "md-text")]
#[command(about = "Prepare markdown articles for publishing: heading anchors, tables of contents, link rewriting and pagination")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output directory for processed articles
    #[arg(short, long, global = true, default_value = "./output")]
    pub output: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Anchor headings and rewrite links, writing the processed articles
    Process(ProcessArgs),

    /// Print the table of contents of each source
    Toc(TocArgs),

    /// Print the slug of each argument
    Slug(SlugArgs),

    /// Paginate the articles found in a directory
    Paginate(PaginateArgs),

    /// Report heading, link and image statistics
    Analyze(AnalyzeArgs),

    /// Validate input sources
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Input sources (file paths, directories or URLs)
    #[arg(required = true, value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Base URL markdown links are rewritten against
    #[arg(long, value_name = "URL")]
    pub base_url: String,

    /// Base path that relative `href`/`src` attributes are resolved against
    #[arg(long, value_name = "PATH")]
    pub relative_base: Option<String>,

    /// Place heading anchors before the heading
    #[arg(long)]
    pub anchor_before: bool,

    /// Leave markdown links untouched
    #[arg(long)]
    pub no_rewrite_links: bool,

    /// Write a JSON metadata file next to each article
    #[arg(long)]
    pub include_metadata: bool,

    /// Force overwrite existing output files
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct TocArgs {
    /// Input sources (file paths, directories or URLs)
    #[arg(required = true, value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Print the table of contents as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SlugArgs {
    /// Text to slugify
    #[arg(required = true, value_name = "TEXT")]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct PaginateArgs {
    /// Directory containing markdown articles
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Page to show (non-numeric values show page 1)
    #[arg(short, long, default_value = "1")]
    pub page: String,

    /// Number of articles per page
    #[arg(long, default_value = "9")]
    pub per_page: usize,

    /// Base href used in page links
    #[arg(long, default_value = "")]
    pub base_href: String,

    /// Template for page links (`{{baseHref}}` and `{{id}}` are substituted)
    #[arg(long, default_value = "{{baseHref}}/browse/{{id}}")]
    pub template: String,

    /// Print the pagination descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input sources (file paths, directories or URLs)
    #[arg(required = true, value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Output analysis to JSON file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// List every heading, link and image
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Input sources (file paths, directories or URLs)
    #[arg(required = true, value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Check if sources are accessible
    #[arg(long)]
    pub check_access: bool,
}
