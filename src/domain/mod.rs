use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod naming;

pub use error::EtlError;
pub use naming::ColumnNameRule;

// ============================================================================
// SQL Lab queries
// ============================================================================

/// An executed SQL Lab query and its result set
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
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

/// Body of `POST /api/queries`; the id is assigned on record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewQuery {
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

impl NewQuery {
    pub fn into_query(self, id: String) -> Query {
        Query {
            id,
            db_id: self.db_id,
            db: self.db,
            user: self.user,
            sql: self.sql,
            tab: self.tab,
            start_dttm: self.start_dttm,
            end_dttm: self.end_dttm,
            results: self.results,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct QueryResults {
    #[serde(default)]
    pub columns: Vec<ResultColumn>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
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
// ETL data sources
// ============================================================================

/// Storage type of a column in an ETL data source
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    String,
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

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
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

/// Column edits keyed by original column name, in column order
pub type ColumnMap = IndexMap<String, ColumnEdit>;

/// Chunk size as sent by clients: a JSON number or the text typed into the form
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawChunkSize {
    Number(i64),
    Text(String),
}

impl RawChunkSize {
    /// Parse into a positive row count no larger than `max`
    pub fn parse(&self, max: u32) -> Result<u32, EtlError> {
        let value = match self {
            RawChunkSize::Number(n) => *n,
            RawChunkSize::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| EtlError::InvalidChunkSize(s.clone()))?,
        };
        if value <= 0 {
            return Err(EtlError::InvalidChunkSize(value.to_string()));
        }
        match u32::try_from(value) {
            Ok(v) if v <= max => Ok(v),
            _ => Err(EtlError::ChunkSizeTooLarge { value, max }),
        }
    }
}

/// Body of `POST /api/etl`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateEtlRequest {
    pub name: String,
    pub chunk_size: RawChunkSize,
    #[serde(default)]
    pub columns: ColumnMap,
    pub sql: String,
    pub db_id: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EtlDatasource {
    pub id: String,
    pub name: String,
    pub chunk_size: u32,
    pub columns: ColumnMap,
    pub sql: String,
    pub db_id: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Ports
// ============================================================================

#[async_trait]
pub trait QueryPort: Send + Sync {
    async fn record_query(&self, query: NewQuery) -> Query;
    async fn get_query(&self, id: &str) -> Result<Query, EtlError>;
    async fn list_queries(&self) -> Vec<Query>;
}

#[async_trait]
pub trait EtlDatasourcePort: Send + Sync {
    async fn insert(&self, datasource: EtlDatasource) -> Result<EtlDatasource, EtlError>;
    async fn list(&self) -> Vec<EtlDatasource>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_size_parsing() {
        assert_eq!(RawChunkSize::Number(500).parse(1000).unwrap(), 500);
        assert_eq!(RawChunkSize::Text(" 1000 ".to_string()).parse(1000).unwrap(), 1000);

        assert!(matches!(
            RawChunkSize::Text("abc".to_string()).parse(1000),
            Err(EtlError::InvalidChunkSize(s)) if s == "abc"
        ));
        assert!(matches!(
            RawChunkSize::Number(0).parse(1000),
            Err(EtlError::InvalidChunkSize(_))
        ));
        assert!(matches!(
            RawChunkSize::Text("-5".to_string()).parse(1000),
            Err(EtlError::InvalidChunkSize(_))
        ));
        assert!(matches!(
            RawChunkSize::Number(1001).parse(1000),
            Err(EtlError::ChunkSizeTooLarge { value: 1001, max: 1000 })
        ));
    }

    #[test]
    fn test_chunk_size_accepts_number_or_text() {
        let number: RawChunkSize = serde_json::from_str("500").unwrap();
        let text: RawChunkSize = serde_json::from_str("\"500\"").unwrap();
        assert_eq!(number, RawChunkSize::Number(500));
        assert_eq!(text, RawChunkSize::Text("500".to_string()));
    }

    #[test]
    fn test_create_request_keeps_column_order() {
        let request: CreateEtlRequest = serde_json::from_str(
            r#"{
                "name": "ds1",
                "chunk_size": "500",
                "columns": {
                    "zeta": {"type": "INTEGER", "is_index": true},
                    "alpha": {"verbose_name": "Alpha"}
                },
                "sql": "SELECT 1",
                "db_id": 7
            }"#,
        )
        .unwrap();

        assert_eq!(request.columns.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(request.columns["zeta"].column_type, Some(ColumnType::Integer));
        assert_eq!(request.columns["alpha"].verbose_name.as_deref(), Some("Alpha"));
    }
}
