//! # ETL Studio
//!
//! ETL Studio turns the result columns of an executed SQL Lab query into a
//! named, typed ETL data source. The backend records queries, hands the ETL
//! dialog its settings, and validates and stores the data sources the dialog
//! submits; the Web UI (the `etl-studio-ui` crate) hosts the dialog itself.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use etl_studio::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let settings = Settings::new()?;
//!
//!     // Server will start on configured host:port
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ETL Studio follows Hexagonal Architecture:
//! - **Domain**: Core types, errors and ports
//! - **Application**: The data source creation use case
//! - **Adapters**: HTTP handlers and in-memory stores
//! - **Config**: Configuration management

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use crate::adapters::ui_handler::UIHandler;
use crate::application::EtlService;
use crate::config::Settings;
use crate::domain::{ColumnNameRule, EtlDatasourcePort, QueryPort};
use axum::{routing::get, Router};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `settings` - Application settings
/// * `queries` - SQL Lab query history
/// * `registry` - Storage for created ETL data sources
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(
    settings: Arc<Settings>,
    queries: Arc<dyn QueryPort>,
    registry: Arc<dyn EtlDatasourcePort>,
) -> anyhow::Result<Router> {
    let rule = ColumnNameRule::new(&settings.etl.column_name_pattern)?;
    let etl = Arc::new(EtlService::new(registry, rule, settings.etl.max_chunk_size));
    let health_handler = Arc::new(HealthHandler::new(settings.clone()));

    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/ready", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.ready().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let api_state = ApiState {
        settings: settings.clone(),
        queries,
        etl,
    };

    let api_router = Router::new()
        .route("/common", get(api_handler::get_common))
        .route("/queries", get(api_handler::list_queries).post(api_handler::create_query))
        .route("/queries/:id", get(api_handler::get_query))
        .route("/etl", get(api_handler::list_etl_datasources).post(api_handler::create_etl_datasource))
        .with_state(api_state);

    let router = health_router
        .nest("/api", api_router)
        // UI endpoint (catch-all for SPA)
        .fallback_service(UIHandler::service(&settings.ui.dist_dir));

    Ok(router.layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    ))
}
