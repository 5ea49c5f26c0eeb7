use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::queries::products::{page_count, ProductListQuery};

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// One page of results plus pagination and sort metadata echoed back to the
/// client. The resolved sort key and direction are lowercased.
#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub sort_by: String,
    pub sort_dir: String,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, query: &ProductListQuery, total_items: u64) -> Self {
        Self {
            items,
            page: query.page,
            page_size: query.page_size,
            total_items,
            total_pages: page_count(total_items, query.page_size),
            sort_by: query.sort_field.as_str().to_ascii_lowercase(),
            sort_dir: query.sort_direction.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::products::ProductListParams;

    #[test]
    fn paged_result_echoes_resolved_sort_lowercased() {
        let mut params = ProductListParams::default();
        params.sort_by = Some("CreatedAt".to_string());
        params.sort_dir = Some("ASC".to_string());
        let query = ProductListQuery::build(&params).unwrap();

        let result: PagedResult<()> = PagedResult::new(vec![], &query, 0);
        assert_eq!(result.sort_by, "createdat");
        assert_eq!(result.sort_dir, "asc");
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn paged_result_computes_total_pages() {
        let query = ProductListQuery::build(&ProductListParams::default()).unwrap();

        let result: PagedResult<()> = PagedResult::new(vec![], &query, 41);
        assert_eq!(result.page, 1);
        assert_eq!(result.page_size, 20);
        assert_eq!(result.total_items, 41);
        assert_eq!(result.total_pages, 3);
    }
}
