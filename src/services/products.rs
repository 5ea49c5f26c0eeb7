use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::product::{self, Entity as Product};
use crate::errors::ServiceError;
use crate::queries::products::{ProductListQuery, ProductMutation, SortDirection, SortField};

/// Product catalog service exposing the persistence operations consumed by
/// the HTTP layer.
#[derive(Clone)]
pub struct ProductCatalogService {
    db: Arc<DatabaseConnection>,
}

impl ProductCatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new product from an already-validated mutation
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        input: ProductMutation,
    ) -> Result<product::Model, ServiceError> {
        let product_id = Uuid::new_v4();

        let row = product::ActiveModel {
            id: Set(product_id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            created_at: Set(Utc::now()),
        };

        let created = row.insert(&*self.db).await?;

        info!("Created product: {}", product_id);
        Ok(created)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: Uuid) -> Result<product::Model, ServiceError> {
        Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Replace name, description and price of an existing product.
    /// `id` and `created_at` are never touched.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: ProductMutation,
    ) -> Result<product::Model, ServiceError> {
        let existing = self.get_product(product_id).await?;
        let mut active: product::ActiveModel = existing.into();

        active.name = Set(input.name);
        active.description = Set(input.description);
        active.price = Set(input.price);

        let updated = active.update(&*self.db).await?;

        info!("Updated product: {}", product_id);
        Ok(updated)
    }

    /// Delete a product by ID
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get_product(product_id).await?;

        let active: product::ActiveModel = existing.into();
        active.delete(&*self.db).await?;

        info!("Deleted product: {}", product_id);
        Ok(())
    }

    /// Execute a validated listing specification: AND-composed optional
    /// filters, a single sort key, an independent total count and a
    /// skip/take window over the sorted rows.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: &ProductListQuery,
    ) -> Result<ProductPage, ServiceError> {
        let mut select = Product::find();

        if let Some(name) = &query.name_contains {
            select = select.filter(product::Column::Name.like(format!("%{}%", name)));
        }
        if let Some(min_price) = query.min_price {
            select = select.filter(product::Column::Price.gte(min_price));
        }
        if let Some(max_price) = query.max_price {
            select = select.filter(product::Column::Price.lte(max_price));
        }

        let column = sort_column(query.sort_field);
        let select = match query.sort_direction {
            SortDirection::Asc => select.order_by_asc(column),
            SortDirection::Desc => select.order_by_desc(column),
        };

        let total_items = select.clone().count(&*self.db).await?;

        let items = select
            .offset(query.offset())
            .limit(query.page_size)
            .all(&*self.db)
            .await?;

        Ok(ProductPage { items, total_items })
    }
}

fn sort_column(field: SortField) -> product::Column {
    match field {
        SortField::Name => product::Column::Name,
        SortField::Price => product::Column::Price,
        SortField::CreatedAt => product::Column::CreatedAt,
    }
}

/// One window of matching products plus the filter-wide total.
#[derive(Debug)]
pub struct ProductPage {
    pub items: Vec<product::Model>,
    pub total_items: u64,
}
