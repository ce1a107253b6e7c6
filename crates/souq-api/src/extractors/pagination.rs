//! Pagination extractor
//!
//! Extracts page-number pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use souq_core::Page;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<i64>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated pagination parameters
///
/// Page numbers start at 1 and limits are clamped to 1-100.
#[derive(Debug, Clone, Default)]
pub struct Pagination(pub Page);

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        let defaults = Page::default();
        Pagination(Page::new(
            params.page.unwrap_or(defaults.page),
            params.limit.unwrap_or(defaults.limit),
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(Pagination::from(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination() {
        let Pagination(page) = Pagination::from(PaginationParams {
            page: None,
            limit: None,
        });
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 20);
    }

    #[test]
    fn test_limit_clamping() {
        let Pagination(page) = Pagination::from(PaginationParams {
            page: Some(0),
            limit: Some(500),
        });
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn test_pagination_from_params() {
        let Pagination(page) = Pagination::from(PaginationParams {
            page: Some(3),
            limit: Some(25),
        });
        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 25);
        assert_eq!(page.offset(), 50);
    }
}
