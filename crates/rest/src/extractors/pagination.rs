//! List-query extractor.
//!
//! Extracts the `page`/`limit` pair and the optional `search_field` /
//! `search_text` parameters list endpoints share.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use haven_store::error::SearchError;
use haven_store::query::{dispatch, SearchDispatch};
use haven_store::types::{EntityKind, PageRequest};
use serde::Deserialize;

use crate::error::RestError;

/// Axum extractor for the shared list parameters.
///
/// # Example
///
/// ```rust,ignore
/// use haven_rest::extractors::ListParams;
///
/// async fn list_handler(params: ListParams) {
///     let request = params.page_request();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    page: Option<u32>,
    limit: Option<u32>,
    search_field: Option<String>,
    search_text: Option<String>,
}

/// Query parameters for list endpoints.
#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    search_field: Option<String>,
    search_text: Option<String>,
}

impl ListParams {
    /// The pagination half of the query.
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            limit: self.limit,
        }
    }

    /// Resolves the search half against an entity's field table.
    ///
    /// Returns `None` when no search was requested or the text is empty; a
    /// field outside the entity's table is an error.
    pub fn search(&self, kind: EntityKind) -> Result<Option<SearchDispatch>, SearchError> {
        let Some(field) = self.search_field.as_deref() else {
            return Ok(None);
        };
        let text = self.search_text.as_deref().unwrap_or("");
        if text.is_empty() {
            return Ok(None);
        }
        dispatch(kind, field, text).map(Some)
    }
}

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ListQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| RestError::bad_request("Invalid list parameters"))?;

        Ok(ListParams {
            page: query.page,
            limit: query.limit,
            search_field: query.search_field,
            search_text: query.search_text,
        })
    }
}
