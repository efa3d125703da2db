use handle_errors::Error;
use std::collections::HashMap;

/// Number of questions returned per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Pagination is extracted from the query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number
    pub page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination { page: 1 }
    }
}

impl Pagination {
    /// Returns the slice of `items` that falls on this page.
    /// Pages past the end come back empty.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(QUESTIONS_PER_PAGE);
        if start >= items.len() {
            return &[];
        }
        let end = usize::min(start + QUESTIONS_PER_PAGE, items.len());
        &items[start..end]
    }
}

/// Extract the page from listing routes
/// # Example query
/// A GET request to `/questions` can carry the page to return
/// `/questions?page=2`
/// # Example usage
/// ```rust
/// use std::collections::HashMap;
/// use trivia::types::pagination::extract_pagination;
///
/// let mut query = HashMap::new();
/// query.insert("page".to_string(), "2".to_string());
/// let p = extract_pagination(query).unwrap();
/// assert_eq!(p.page, 2);
/// ```
pub fn extract_pagination(params: HashMap<String, String>) -> Result<Pagination, Error> {
    match params.get("page") {
        Some(page) => {
            let page = page.parse::<usize>().map_err(Error::ParseError)?;
            if page == 0 {
                return Err(Error::InvalidPage(page));
            }
            Ok(Pagination { page })
        }
        None => Ok(Pagination::default()),
    }
}
