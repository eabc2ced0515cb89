//! REST API handlers for the ETL Studio Web UI
//!
//! Serves the SQL Lab query history, the settings injected into the ETL
//! dialog, and creation/listing of ETL data sources.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::EtlService;
use crate::config::Settings;
use crate::domain::{CreateEtlRequest, EtlDatasource, NewQuery, Query, QueryPort};

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub settings: Arc<Settings>,
    pub queries: Arc<dyn QueryPort>,
    pub etl: Arc<EtlService>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Settings the SQL Lab page passes into the ETL dialog
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommonDto {
    pub webserver_timeout: u64,
    pub etl_error_message: String,
    pub column_name_pattern: String,
}

impl From<&Settings> for CommonDto {
    fn from(settings: &Settings) -> Self {
        Self {
            webserver_timeout: settings.sqllab.webserver_timeout,
            etl_error_message: settings.sqllab.etl_error_message.clone(),
            column_name_pattern: settings.etl.column_name_pattern.clone(),
        }
    }
}

// ============================================================================
// Common
// ============================================================================

/// GET /api/common - Settings shared with the ETL dialog
pub async fn get_common(State(state): State<ApiState>) -> impl IntoResponse {
    Json(ApiResponse::success(CommonDto::from(state.settings.as_ref())))
}

// ============================================================================
// SQL Lab queries
// ============================================================================

/// GET /api/queries - List recorded queries
pub async fn list_queries(State(state): State<ApiState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.queries.list_queries().await))
}

/// GET /api/queries/:id - Get a recorded query
pub async fn get_query(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.queries.get_query(&id).await {
        Ok(query) => (StatusCode::OK, Json(ApiResponse::success(query))),
        Err(e) => (e.status_code(), Json(ApiResponse::<Query>::error(e.to_string()))),
    }
}

/// POST /api/queries - Record an executed query
pub async fn create_query(
    State(state): State<ApiState>,
    payload: Result<Json<NewQuery>, JsonRejection>,
) -> impl IntoResponse {
    let Json(query) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected::<Query>(rejection),
    };
    let query = state.queries.record_query(query).await;
    (StatusCode::CREATED, Json(ApiResponse::success(query)))
}

// ============================================================================
// ETL data sources
// ============================================================================

/// GET /api/etl - List created ETL data sources
pub async fn list_etl_datasources(State(state): State<ApiState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.etl.list().await))
}

/// POST /api/etl - Create an ETL data source from a query's columns
pub async fn create_etl_datasource(
    State(state): State<ApiState>,
    payload: Result<Json<CreateEtlRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected::<EtlDatasource>(rejection),
    };
    match state.etl.create(request).await {
        Ok(datasource) => (StatusCode::CREATED, Json(ApiResponse::success(datasource))),
        Err(e) => {
            tracing::warn!("Rejected ETL data source: {}", e);
            (
                e.status_code(),
                Json(ApiResponse::<EtlDatasource>::error(e.to_string())),
            )
        }
    }
}

/// Malformed request bodies keep axum's status but use the response envelope
fn rejected<T>(rejection: JsonRejection) -> (StatusCode, Json<ApiResponse<T>>) {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    (rejection.status(), Json(ApiResponse::error(rejection.body_text())))
}
