use crate::types::PaginationDescriptor;
use tracing::debug;

pub const DEFAULT_HREF_TEMPLATE: &str = "{{baseHref}}/browse/{{id}}";
pub const DEFAULT_PER_PAGE: usize = 9;

/// A requested page number, as it arrives from a route parameter or from code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Number(i64),
    Text(String),
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl From<i32> for PageRequest {
    fn from(page: i32) -> Self {
        Self::Number(page.into())
    }
}

impl From<i64> for PageRequest {
    fn from(page: i64) -> Self {
        Self::Number(page)
    }
}

impl From<usize> for PageRequest {
    fn from(page: usize) -> Self {
        Self::Number(i64::try_from(page).unwrap_or(i64::MAX))
    }
}

impl From<&str> for PageRequest {
    fn from(page: &str) -> Self {
        Self::Text(page.to_string())
    }
}

impl From<String> for PageRequest {
    fn from(page: String) -> Self {
        Self::Text(page)
    }
}

impl PageRequest {
    /// The 1-based page this request names. Anything unusable means page 1.
    pub fn page_number(&self) -> usize {
        let page = match self {
            Self::Number(page) => Some(*page),
            Self::Text(text) if text.is_empty() => Some(1),
            Self::Text(text) => parse_leading_int(text),
        };

        match page {
            Some(page) if page >= 1 => usize::try_from(page).unwrap_or(usize::MAX),
            _ => 1,
        }
    }
}

/// Read the decimal integer at the start of `text`, ignoring leading whitespace and
/// anything after the digits (`" 12px"` is 12). Values too large for an `i64` saturate.
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }

    Some(match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    pub base_href: String,
    pub href_template: String,
    pub per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            base_href: String::new(),
            href_template: DEFAULT_HREF_TEMPLATE.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Work out page counts and the slice bounds of the requested page.
///
/// Never fails: an unparseable or out of range page falls back to page 1, and a
/// `per_page` of 0 is treated as 1.
pub fn compute_pagination(
    total_count: usize,
    requested_page: impl Into<PageRequest>,
    config: &PaginationConfig,
) -> PaginationDescriptor {
    let current_page = requested_page.into().page_number();
    let per_page = config.per_page.max(1);

    let slice_start = if current_page <= 1 {
        0
    } else {
        (current_page - 1).saturating_mul(per_page)
    };

    let descriptor = PaginationDescriptor {
        total_count,
        current_page,
        per_page,
        total_pages: total_count.div_ceil(per_page),
        base_href: config.base_href.clone(),
        href_template: config.href_template.clone(),
        slice_start,
        slice_end: slice_start.saturating_add(per_page),
    };

    debug!(
        "Page {}/{} covers items {}..{}",
        descriptor.current_page, descriptor.total_pages, descriptor.slice_start, descriptor.slice_end
    );

    descriptor
}

impl PaginationDescriptor {
    /// Render `href_template` for `page`, filling `{{baseHref}}` and `{{id}}`.
    pub fn href_for(&self, page: usize) -> String {
        self.href_template
            .replace("{{baseHref}}", &self.base_href)
            .replace("{{id}}", &page.to_string())
    }

    pub fn page_hrefs(&self) -> Vec<String> {
        (1..=self.total_pages).map(|page| self.href_for(page)).collect()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// The items of the current page. Bounds past the end of `items` are clamped.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.slice_start.min(items.len());
        let end = self.slice_end.min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_page(per_page: usize) -> PaginationConfig {
        PaginationConfig {
            per_page,
            ..PaginationConfig::default()
        }
    }

    #[test]
    fn test_first_page() {
        let pagination = compute_pagination(25, 1, &per_page(10));
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.current_page, 1);
        assert_eq!(pagination.slice_start, 0);
        assert_eq!(pagination.slice_end, 10);
    }

    #[test]
    fn test_page_from_string() {
        let pagination = compute_pagination(25, "3", &per_page(10));
        assert_eq!(pagination.current_page, 3);
        assert_eq!(pagination.slice_start, 20);
        assert_eq!(pagination.slice_end, 30);
    }

    #[test]
    fn test_unparseable_page_falls_back_to_first() {
        for page in ["abc", "", "-2", "0", "   "] {
            let pagination = compute_pagination(25, page, &per_page(10));
            assert_eq!(pagination.current_page, 1, "page: {page:?}");
            assert_eq!(pagination.slice_start, 0);
        }
        assert_eq!(compute_pagination(25, 0, &per_page(10)).current_page, 1);
        assert_eq!(compute_pagination(25, -4, &per_page(10)).current_page, 1);
    }

    #[test]
    fn test_leading_integer_parse() {
        assert_eq!(PageRequest::from(" 2").page_number(), 2);
        assert_eq!(PageRequest::from("4abc").page_number(), 4);
        assert_eq!(PageRequest::from("+5").page_number(), 5);
        assert_eq!(PageRequest::from("2.9").page_number(), 2);
        assert_eq!(PageRequest::default().page_number(), 1);
    }

    #[test]
    fn test_oversized_page_saturates() {
        let huge = PageRequest::from("99999999999999999999999");
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999999"), Some(i64::MIN));
        assert_eq!(huge.page_number(), usize::try_from(i64::MAX).unwrap_or(usize::MAX));

        let pagination =
            compute_pagination(5, "99999999999999999999999", &PaginationConfig::default());
        assert_eq!(pagination.slice_end, usize::MAX);
        assert!(pagination.slice(&[1, 2, 3, 4, 5]).is_empty());

        assert_eq!(PageRequest::from("-99999999999999999999999").page_number(), 1);
        assert_eq!(PageRequest::from("0x10").page_number(), 1);
    }

    #[test]
    fn test_empty_collection() {
        let pagination = compute_pagination(0, 1, &PaginationConfig::default());
        assert_eq!(pagination.total_pages, 0);
        assert_eq!(pagination.per_page, 9);
        assert_eq!(pagination.slice_start, 0);
        assert_eq!(pagination.slice_end, 9);
        assert!(!pagination.has_next());
        assert!(pagination.page_hrefs().is_empty());
    }

    #[test]
    fn test_zero_per_page_is_coerced() {
        let pagination = compute_pagination(3, 2, &per_page(0));
        assert_eq!(pagination.per_page, 1);
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.slice_start, 1);
        assert_eq!(pagination.slice_end, 2);
    }

    #[test]
    fn test_page_past_the_end() {
        let items: Vec<u32> = (0..25).collect();
        let pagination = compute_pagination(items.len(), 7, &per_page(10));
        assert_eq!(pagination.slice_start, 60);
        assert!(pagination.slice(&items).is_empty());
        assert!(pagination.has_previous());
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_slice_last_page() {
        let items: Vec<u32> = (0..25).collect();
        let pagination = compute_pagination(items.len(), "3", &per_page(10));
        assert_eq!(pagination.slice(&items), &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_hrefs() {
        let config = PaginationConfig {
            base_href: "/articles".to_string(),
            per_page: 10,
            ..PaginationConfig::default()
        };
        let pagination = compute_pagination(25, 2, &config);

        assert_eq!(pagination.href_for(2), "/articles/browse/2");
        assert_eq!(
            pagination.page_hrefs(),
            vec!["/articles/browse/1", "/articles/browse/2", "/articles/browse/3"]
        );
        assert!(pagination.has_previous());
        assert!(pagination.has_next());
    }

    #[test]
    fn test_serializes_camel_case() {
        let pagination = compute_pagination(25, 1, &per_page(10));
        let json = serde_json::to_value(&pagination).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hrefTemplate"], DEFAULT_HREF_TEMPLATE);
        assert_eq!(json["sliceEnd"], 10);
    }
}
