//! URL-safe slug generation.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());
static HYPHEN_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--+").unwrap());

/// Combining Diacritical Marks block.
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Convert human readable text into a lowercase, hyphen separated, URL-safe slug.
///
/// Accented letters keep their base letter (`é` becomes `e`); anything that is not an
/// ASCII word character or a hyphen is dropped. Never fails, and `""` maps to `""`.
///
/// # Examples
///
/// ```
/// use markdown_text::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  multiple   spaces  "), "multiple-spaces");
/// assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
/// ```
pub fn slugify(input: &str) -> String {
    let stripped: String = input.nfd().filter(|c| !is_diacritic(*c)).collect();
    let lowered = stripped.to_lowercase();
    let hyphenated = WHITESPACE_RUN_RE.replace_all(lowered.trim(), "-");
    let cleaned = NON_WORD_RE.replace_all(&hyphenated, "");

    HYPHEN_RUN_RE.replace_all(&cleaned, "-").into_owned()
}
