//! API client for the ETL Studio backend

use crate::types::*;
use gloo_net::http::Request;

const API_BASE: &str = "/api";

/// Fetch the settings injected into the ETL dialog
pub async fn get_common() -> Result<CommonSettings, String> {
    let url = format!("{}/common", API_BASE);
    fetch_json::<CommonSettings>(&url).await
}

// ============================================================================
// SQL Lab queries
// ============================================================================

pub async fn list_queries() -> Result<Vec<Query>, String> {
    let url = format!("{}/queries", API_BASE);
    fetch_json::<Vec<Query>>(&url).await
}

// ============================================================================
// ETL data sources
// ============================================================================

/// Create an ETL data source from the dialog's request
pub async fn create_etl_datasource(request: EtlRequest) -> Result<EtlDatasource, String> {
    let url = format!("{}/etl", API_BASE);
    post_json::<EtlRequest, EtlDatasource>(&url, &request).await
}

pub async fn list_etl_datasources() -> Result<Vec<EtlDatasource>, String> {
    let url = format!("{}/etl", API_BASE);
    fetch_json::<Vec<EtlDatasource>>(&url).await
}

// ============================================================================
// Helpers
// ============================================================================

fn unwrap_response<T>(api_response: ApiResponse<T>) -> Result<T, String> {
    if api_response.success {
        api_response.data.ok_or_else(|| "No data in response".to_string())
    } else {
        Err(api_response.error.unwrap_or_else(|| "Unknown error".to_string()))
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let api_response: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    unwrap_response(api_response)
}

async fn post_json<T: serde::Serialize, R: serde::de::DeserializeOwned>(
    url: &str,
    body: &T,
) -> Result<R, String> {
    let response = Request::post(url)
        .json(body)
        .map_err(|e| format!("Failed to serialize body: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let api_response: ApiResponse<R> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    unwrap_response(api_response)
}
