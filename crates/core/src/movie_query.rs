//! List query builder for `GET /movies`.
//!
//! Turns raw query-string parameters into a [`MovieQuery`]: a filter, an
//! optional sort and a pagination window. Stores consume the result; nothing
//! here touches SQL or storage.

use serde::Deserialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page used when `page` is omitted (1-based).
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `limit` is omitted.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

// ---------------------------------------------------------------------------
// Raw parameters
// ---------------------------------------------------------------------------

/// Query parameters accepted by the list endpoint.
///
/// Everything arrives as a string so that non-numeric values can be rejected
/// with a clear message instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieListParams {
    pub title: Option<String>,
    pub q: Option<String>,
    pub rating: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` selects descending; anything else falls back to ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Record fields a list can be ordered by, keyed by their JSON names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Director,
    ReleaseYear,
    Genre,
    Rating,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "director" => Some(Self::Director),
            "releaseYear" => Some(Self::ReleaseYear),
            "genre" => Some(Self::Genre),
            "rating" => Some(Self::Rating),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    /// Column name in the `movies` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Director => "director",
            Self::ReleaseYear => "release_year",
            Self::Genre => "genre",
            Self::Rating => "rating",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse `field:direction`.
    ///
    /// Returns `None` for an unknown field: ordering by a field no record
    /// carries leaves the default creation order in place.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(2, ':');
        let field = SortField::from_key(parts.next()?.trim())?;
        let direction = SortDirection::parse(parts.next().map(str::trim));
        Some(Self { field, direction })
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Record selection criteria. All present conditions must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
    /// Case-insensitive substring of title, director or genre.
    pub text_contains: Option<String>,
    /// Inclusive lower bound on rating.
    pub min_rating: Option<f64>,
}

impl MovieFilter {
    pub fn is_empty(&self) -> bool {
        self.title_contains.is_none() && self.text_contains.is_none() && self.min_rating.is_none()
    }

    /// Evaluate the filter against a record's fields.
    ///
    /// Stores that cannot push the filter down (the in-memory store) use this
    /// so both backends agree on what matches.
    pub fn matches(&self, title: &str, director: &str, genre: &str, rating: f64) -> bool {
        if let Some(needle) = &self.title_contains {
            if !contains_ignore_case(title, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.text_contains {
            let hit = [title, director, genre]
                .iter()
                .any(|hay| contains_ignore_case(hay, needle));
            if !hit {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if rating < min {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Escape `LIKE`/`ILIKE` metacharacters so user input matches literally.
///
/// Uses backslash, PostgreSQL's default escape character.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: i64,
    /// Page size, always >= 1.
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Pagination {
    /// Rows to skip before the page starts.
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Rows in one page.
    pub fn take(&self) -> i64 {
        self.limit
    }

    /// `ceil(total / limit)`; zero matching records means zero pages.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total - 1) / self.limit + 1
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Everything a store needs to answer a list request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieQuery {
    pub filter: MovieFilter,
    pub sort: Option<SortSpec>,
    pub pagination: Pagination,
}

impl MovieQuery {
    /// Build a query from raw list parameters.
    ///
    /// Empty values count as absent. Non-numeric `rating`, `page` or `limit`
    /// and non-positive `page` or `limit` are rejected.
    pub fn from_params(params: &MovieListParams) -> Result<Self, CoreError> {
        let filter = MovieFilter {
            title_contains: non_empty(&params.title).map(str::to_string),
            text_contains: non_empty(&params.q).map(str::to_string),
            min_rating: non_empty(&params.rating)
                .map(parse_rating)
                .transpose()?,
        };

        let sort = non_empty(&params.sort_by).and_then(SortSpec::parse);

        let page = non_empty(&params.page)
            .map(|raw| parse_positive("page", raw))
            .transpose()?
            .unwrap_or(DEFAULT_PAGE);
        let limit = non_empty(&params.limit)
            .map(|raw| parse_positive("limit", raw))
            .transpose()?
            .unwrap_or(DEFAULT_PAGE_LIMIT);

        Ok(Self {
            filter,
            sort,
            pagination: Pagination { page, limit },
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_rating(raw: &str) -> Result<f64, CoreError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoreError::Validation(format!(
            "rating must be a number, got '{raw}'"
        ))),
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<i64, CoreError> {
    match raw.parse::<i64>() {
        Ok(v) if v >= 1 => Ok(v),
        Ok(v) => Err(CoreError::Validation(format!(
            "{name} must be at least 1, got {v}"
        ))),
        Err(_) => Err(CoreError::Validation(format!(
            "{name} must be an integer, got '{raw}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn params() -> MovieListParams {
        MovieListParams::default()
    }

    // -- defaults -------------------------------------------------------------

    #[test]
    fn no_params_yields_defaults() {
        let query = MovieQuery::from_params(&params()).unwrap();
        assert!(query.filter.is_empty());
        assert_eq!(query.sort, None);
        assert_eq!(query.pagination.page, 1);
        assert_eq!(query.pagination.limit, 10);
        assert_eq!(query.pagination.skip(), 0);
    }

    #[test]
    fn empty_values_count_as_absent() {
        let p = MovieListParams {
            title: Some(String::new()),
            rating: Some(" ".into()),
            page: Some(String::new()),
            ..params()
        };
        let query = MovieQuery::from_params(&p).unwrap();
        assert!(query.filter.is_empty());
        assert_eq!(query.pagination, Pagination::default());
    }

    // -- filter ---------------------------------------------------------------

    #[test]
    fn title_and_q_are_independent() {
        let p = MovieListParams {
            title: Some("dune".into()),
            q: Some("villeneuve".into()),
            ..params()
        };
        let query = MovieQuery::from_params(&p).unwrap();
        assert_eq!(query.filter.title_contains.as_deref(), Some("dune"));
        assert_eq!(query.filter.text_contains.as_deref(), Some("villeneuve"));
    }

    #[test]
    fn rating_parses_as_threshold() {
        let p = MovieListParams {
            rating: Some("7".into()),
            ..params()
        };
        let query = MovieQuery::from_params(&p).unwrap();
        assert_eq!(query.filter.min_rating, Some(7.0));
    }

    #[test]
    fn non_numeric_rating_is_rejected() {
        let p = MovieListParams {
            rating: Some("high".into()),
            ..params()
        };
        assert_matches!(MovieQuery::from_params(&p), Err(CoreError::Validation(_)));
    }

    #[test]
    fn nan_rating_is_rejected() {
        let p = MovieListParams {
            rating: Some("NaN".into()),
            ..params()
        };
        assert_matches!(MovieQuery::from_params(&p), Err(CoreError::Validation(_)));
    }

    #[test]
    fn filter_matches_inclusive_rating_bound() {
        let filter = MovieFilter {
            min_rating: Some(7.0),
            ..Default::default()
        };
        assert!(filter.matches("Heat", "Mann", "Crime", 7.0));
        assert!(!filter.matches("Heat", "Mann", "Crime", 6.9));
    }

    #[test]
    fn filter_title_is_case_insensitive_substring() {
        let filter = MovieFilter {
            title_contains: Some("DUN".into()),
            ..Default::default()
        };
        assert!(filter.matches("Dune: Part Two", "Villeneuve", "Sci-Fi", 8.6));
        assert!(!filter.matches("Arrival", "Villeneuve", "Sci-Fi", 7.9));
    }

    #[test]
    fn filter_text_searches_director_and_genre() {
        let filter = MovieFilter {
            text_contains: Some("sci".into()),
            ..Default::default()
        };
        assert!(filter.matches("Arrival", "Villeneuve", "Sci-Fi", 7.9));
        assert!(!filter.matches("Heat", "Mann", "Crime", 8.3));
    }

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("100%_a\\b"), "100\\%\\_a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    // -- sort -----------------------------------------------------------------

    #[test]
    fn sort_by_field_and_direction() {
        let spec = SortSpec::parse("releaseYear:desc").unwrap();
        assert_eq!(spec.field, SortField::ReleaseYear);
        assert_eq!(spec.direction, SortDirection::Desc);
    }

    #[test]
    fn sort_direction_defaults_to_asc() {
        assert_eq!(SortSpec::parse("title").unwrap().direction, SortDirection::Asc);
        assert_eq!(
            SortSpec::parse("title:sideways").unwrap().direction,
            SortDirection::Asc
        );
    }

    #[test]
    fn unknown_sort_field_yields_no_sort() {
        assert_eq!(SortSpec::parse("budget:desc"), None);
    }

    // -- pagination -----------------------------------------------------------

    #[test]
    fn page_and_limit_compute_window() {
        let p = MovieListParams {
            page: Some("3".into()),
            limit: Some("5".into()),
            ..params()
        };
        let pagination = MovieQuery::from_params(&p).unwrap().pagination;
        assert_eq!(pagination.skip(), 10);
        assert_eq!(pagination.take(), 5);
    }

    #[test]
    fn non_numeric_page_is_rejected() {
        let p = MovieListParams {
            page: Some("two".into()),
            ..params()
        };
        assert_matches!(MovieQuery::from_params(&p), Err(CoreError::Validation(_)));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let p = MovieListParams {
            limit: Some("0".into()),
            ..params()
        };
        assert_matches!(MovieQuery::from_params(&p), Err(CoreError::Validation(_)));
    }

    #[test]
    fn total_pages_rounds_up() {
        let pagination = Pagination::default();
        assert_eq!(pagination.total_pages(0), 0);
        assert_eq!(pagination.total_pages(10), 1);
        assert_eq!(pagination.total_pages(15), 2);
        assert_eq!(pagination.total_pages(21), 3);
    }

    #[test]
    fn total_pages_with_huge_limit_is_one() {
        let pagination = Pagination {
            page: 1,
            limit: i64::MAX,
        };
        assert_eq!(pagination.total_pages(2), 1);
        assert_eq!(pagination.total_pages(i64::MAX), 1);
    }
}
