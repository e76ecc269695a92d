use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Limit/offset query parameters shared by the list endpoints.
///
/// Defaulting and clamping happen here, at the transport boundary; the
/// services below receive already-sanitized values and do not re-validate.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Maximum number of rows to return (default: 10, max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,

    /// Number of rows to skip (default: 0)
    #[param(minimum = 0)]
    pub offset: Option<i64>,
}

impl PageQuery {
    /// Effective limit: default on absent or non-positive input, capped at
    /// MAX_PAGE_SIZE.
    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(l) if l > 0 => l.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// Effective offset: default on absent or negative input.
    pub fn offset(&self) -> i64 {
        match self.offset {
            Some(o) if o >= 0 => o,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let q = PageQuery::default();
        assert_eq!(q.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_page_query_invalid_values_fall_back() {
        let q = PageQuery {
            limit: Some(0),
            offset: Some(-5),
        };
        assert_eq!(q.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(q.offset(), 0);

        let q = PageQuery {
            limit: Some(-1),
            offset: None,
        };
        assert_eq!(q.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_query_limit_clamped_to_max() {
        let q = PageQuery {
            limit: Some(1000),
            offset: Some(20),
        };
        assert_eq!(q.limit(), MAX_PAGE_SIZE);
        assert_eq!(q.offset(), 20);
    }
}
