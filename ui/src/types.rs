//! Shared types for the ETL Studio Web UI
//!
//! These types mirror the backend API response structures.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Generic API response wrapper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Read-only settings the host page injects into the ETL dialog
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommonSettings {
    /// Explore view timeout in seconds
    pub webserver_timeout: u64,
    pub etl_error_message: String,
    /// Regex every column name of a new data source must match
    pub column_name_pattern: String,
}

// ============================================================================
// SQL Lab queries
// ============================================================================

/// An executed SQL Lab query and its result set
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Query {
    pub id: String,
    pub db_id: i64,
    #[serde(default)]
    pub db: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    pub sql: String,
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(default)]
    pub start_dttm: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_dttm: Option<DateTime<Utc>>,
    #[serde(default)]
    pub results: Option<QueryResults>,
}

impl Query {
    /// Result columns, or `None` when the query produced no usable result set.
    pub fn result_columns(&self) -> Option<&[ResultColumn]> {
        self.results
            .as_ref()
            .map(|r| r.columns.as_slice())
            .filter(|cols| !cols.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct QueryResults {
    #[serde(default)]
    pub columns: Vec<ResultColumn>,
}

/// Column descriptor as reported by the engine that ran the query
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ResultColumn {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub is_date: bool,
    #[serde(default)]
    pub is_dim: bool,
}

// ============================================================================
// ETL column metadata
// ============================================================================

/// Storage type of a column in the new data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    String,
    #[default]
    Text,
    Integer,
    Numeric,
    DateTime,
    Date,
    Time,
    Boolean,
    Array,
    Json,
}

impl ColumnType {
    pub const ALL: [ColumnType; 10] = [
        ColumnType::String,
        ColumnType::Text,
        ColumnType::Integer,
        ColumnType::Numeric,
        ColumnType::DateTime,
        ColumnType::Date,
        ColumnType::Time,
        ColumnType::Boolean,
        ColumnType::Array,
        ColumnType::Json,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            ColumnType::String => "STRING",
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Date => "DATE",
            ColumnType::Time => "TIME",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Array => "ARRAY",
            ColumnType::Json => "JSON",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::String => "String",
            ColumnType::Text => "Text",
            ColumnType::Integer => "Integer",
            ColumnType::Numeric => "Numeric",
            ColumnType::DateTime => "DateTime",
            ColumnType::Date => "Date",
            ColumnType::Time => "Time",
            ColumnType::Boolean => "Boolean",
            ColumnType::Array => "ARRAY",
            ColumnType::Json => "JSON",
        }
    }

    /// Map an engine type tag onto a storage type. `OBJECT` and unknown tags map to `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.tag().eq_ignore_ascii_case(tag))
    }
}

/// Per-column customization pending submission.
///
/// `None` fields are "not yet customized": the column's own name is shown,
/// the type defaults to TEXT and flags are unchecked.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ColumnEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dim: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
}

impl ColumnEdit {
    /// Default edit for a column nobody has touched yet
    pub fn from_column(column: &ResultColumn) -> Self {
        Self {
            verbose_name: None,
            is_index: None,
            is_dim: column.is_dim.then_some(true),
            column_type: column.type_name.as_deref().and_then(ColumnType::from_tag),
        }
    }

    pub fn display_name<'a>(&'a self, column_name: &'a str) -> &'a str {
        self.verbose_name.as_deref().unwrap_or(column_name)
    }

    pub fn effective_type(&self) -> ColumnType {
        self.column_type.unwrap_or_default()
    }

    pub fn flag(&self, flag: ColumnFlag) -> bool {
        match flag {
            ColumnFlag::Index => self.is_index,
            ColumnFlag::Dimension => self.is_dim,
        }
        .unwrap_or(false)
    }
}

/// Boolean attributes a column edit can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFlag {
    Index,
    Dimension,
}

/// Column edits keyed by original column name, in column order
pub type ColumnMap = IndexMap<String, ColumnEdit>;

// ============================================================================
// ETL data sources
// ============================================================================

/// Payload of the "create ETL data source" action
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EtlRequest {
    pub name: String,
    /// Sent exactly as typed; the backend parses it
    pub chunk_size: String,
    pub columns: ColumnMap,
    pub sql: String,
    pub db_id: i64,
}

/// ETL data source as stored by the backend
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EtlDatasource {
    pub id: String,
    pub name: String,
    pub chunk_size: u32,
    pub columns: ColumnMap,
    pub sql: String,
    pub db_id: i64,
    pub created_at: DateTime<Utc>,
}
