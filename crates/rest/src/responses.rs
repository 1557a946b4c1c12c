//! Response envelope builders.
//!
//! Every endpoint answers with the same envelope: `success`, then `data` or
//! `message`, and for lists the pagination counters `totalPages`,
//! `currentPage`, `total`, and `limit`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use haven_store::types::Page;
use serde_json::{json, Value};

/// 200 with a data payload.
pub fn ok(data: Value) -> Response {
    (StatusCode::OK, Json(json!({"success": true, "data": data}))).into_response()
}

/// 200 with a message and no data.
pub fn message(text: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": text.into()})),
    )
        .into_response()
}

/// 201 with the created record.
pub fn created(data: Value) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "data": data})),
    )
        .into_response()
}

/// 200 with a page of records and the pagination counters.
pub fn page(page: Page<Value>) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": page.records,
            "totalPages": page.total_pages,
            "currentPage": page.current_page,
            "total": page.total,
            "limit": page.limit,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_store::types::PageRequest;

    #[test]
    fn page_envelope_carries_counters() {
        let request = PageRequest::new(2, 2);
        let response = page(Page::new(vec![json!({"a": 1})], 5, &request));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn created_is_201() {
        let response = created(json!({"id": "x"}));
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
