// Request parameter validation
//
// Every query parameter is parsed and bound-checked here before a query is
// built. Required parameters reject; pagination and ordering parameters clamp
// to defaults instead of failing.

use thiserror::Error;

// =============================================================================
// Limits
// =============================================================================

/// Page length used when `pageLength` is absent, unparsable or below 1.
pub const DEFAULT_PAGE_LENGTH: i64 = 10;

/// Largest page length a caller can request.
pub const MAX_PAGE_LENGTH: i64 = 30;

/// Page used when `page` is absent, unparsable or below 1.
pub const DEFAULT_PAGE: i64 = 1;

// =============================================================================
// Errors
// =============================================================================

/// Validation failure. `Display` is the message returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required parameter absent or empty
    #[error("Missing {0}")]
    Missing(&'static str),

    /// Parameter present but not an integer
    #[error("Invalid {0}")]
    Invalid(&'static str),

    /// Keyed filter not of the form `<index>:<value>`
    #[error("Invalid key format")]
    InvalidKeyFormat,

    /// Keyed filter index is not an integer
    #[error("Invalid key index")]
    InvalidKeyIndex,
}

// =============================================================================
// Raw parameters
// =============================================================================

/// Query string parameters in arrival order.
///
/// Lookups by name return the first occurrence; empty values count as absent.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `name`; an empty value counts as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Every value supplied for a repeatable parameter, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Required 64-bit integer parameter.
    pub fn require_i64(&self, name: &'static str) -> Result<i64, ValidationError> {
        self.get(name)
            .ok_or(ValidationError::Missing(name))?
            .parse()
            .map_err(|_| ValidationError::Invalid(name))
    }

    /// Required array position parameter.
    pub fn require_index(&self, name: &'static str) -> Result<i32, ValidationError> {
        self.get(name)
            .ok_or(ValidationError::Missing(name))?
            .parse()
            .map_err(|_| ValidationError::Invalid(name))
    }

    /// Optional array position parameter. Presence is significant, so an
    /// unparsable value rejects rather than falling back.
    pub fn optional_index(&self, name: &'static str) -> Result<Option<i32>, ValidationError> {
        match self.get(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ValidationError::Invalid(name)),
        }
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Effective page length: default 10, capped at 30.
pub fn page_length(raw: Option<&str>) -> i64 {
    match raw.and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n >= 1 => n.min(MAX_PAGE_LENGTH),
        _ => DEFAULT_PAGE_LENGTH,
    }
}

/// Effective 1-based page number.
pub fn page_number(raw: Option<&str>) -> i64 {
    match raw.and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n >= 1 => n,
        _ => DEFAULT_PAGE,
    }
}

/// Page window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_length: i64,
    pub page: i64,
}

impl Pagination {
    pub fn new(page_length: i64, page: i64) -> Self {
        Self { page_length, page }
    }

    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            page_length: page_length(params.get("pageLength")),
            page: page_number(params.get("page")),
        }
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_length)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LENGTH, DEFAULT_PAGE)
    }
}

// =============================================================================
// Ordering
// =============================================================================

/// Sort direction for the ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Exactly `"desc"` sorts descending; every other value is ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// =============================================================================
// Keyed filters
// =============================================================================

/// Equality predicate on one position of the `keys` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFilter {
    pub idx: i32,
    pub value: String,
}

impl std::str::FromStr for KeyFilter {
    type Err = ValidationError;

    /// Parses `<index>:<value>`. A value containing a colon is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [idx, value] = parts.as_slice() else {
            return Err(ValidationError::InvalidKeyFormat);
        };
        let idx = idx
            .parse()
            .map_err(|_| ValidationError::InvalidKeyIndex)?;
        Ok(Self {
            idx,
            value: value.to_string(),
        })
    }
}

/// Parse every `keys` filter; at least one is required.
pub fn key_filters(params: &QueryParams) -> Result<Vec<KeyFilter>, ValidationError> {
    let raw = params.get_all("keys");
    if raw.is_empty() {
        return Err(ValidationError::Missing("keys"));
    }
    raw.into_iter().map(str::parse).collect()
}
