use axum::{
    extract::{Json, Path, Query, State},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::product;
use crate::errors::ServiceError;
use crate::handlers::common::{
    created_response, no_content_response, success_response, PagedResult,
};
use crate::queries::products::{validate_mutation, ProductListParams, ProductListQuery};
use crate::AppState;

/// Creates the router for product endpoints
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// List products with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Products retrieved", body = PagedResult<ProductResponse>),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let query = ProductListQuery::build(&params)?;

    let page = state.catalog.list_products(&query).await?;
    let items: Vec<ProductResponse> = page.items.into_iter().map(ProductResponse::from).collect();

    Ok(success_response(PagedResult::new(
        items,
        &query,
        page.total_items,
    )))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product retrieved", body = ProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let product = state.catalog.get_product(id).await?;

    Ok(success_response(ProductResponse::from(product)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let mutation = validate_mutation(
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.price,
    )?;

    let product = state.catalog.create_product(mutation).await?;

    Ok(created_response(ProductResponse::from(product)))
}

/// Update an existing product
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    let mutation = validate_mutation(
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.price,
    )?;

    let product = state.catalog.update_product(id, mutation).await?;

    Ok(success_response(ProductResponse::from(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ServiceError> {
    state.catalog.delete_product(id).await?;

    Ok(no_content_response())
}

// Request/Response DTOs
//
// Every payload field deserializes with a default so that the shared
// mutation validator, not the JSON deserializer, decides how missing or
// empty input is reported.

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// Product display name (required, max 200 characters)
    #[serde(default)]
    #[schema(example = "Coffee Beans")]
    pub name: Option<String>,
    /// Product description (max 1000 characters)
    #[serde(default)]
    #[schema(example = "Single origin medium roast.")]
    pub description: Option<String>,
    /// Unit price, must be greater than zero
    #[serde(default)]
    #[schema(example = "12.99")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    /// Product UUID
    pub id: Uuid,
    /// Product display name
    pub name: String,
    /// Product description, empty when never set
    pub description: String,
    /// Unit price
    #[schema(example = "12.99")]
    pub price: Decimal,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            created_at: model.created_at,
        }
    }
}
