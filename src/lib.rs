//! Catalog API Library
//!
//! This crate provides a single-resource product catalog service: CRUD
//! operations plus a paginated, filtered, sorted listing endpoint backed by
//! SeaORM.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod queries;
pub mod seeder;
pub mod services;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub catalog: services::products::ProductCatalogService,
}

/// Builds the full HTTP surface of the service: product routes plus the
/// health probe.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", handlers::products::products_routes())
        .merge(handlers::health::health_routes())
}
