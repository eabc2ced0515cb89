use std::sync::Arc;

use crate::domain::{
    ColumnNameRule, CreateEtlRequest, EtlDatasource, EtlDatasourcePort, EtlError,
};

/// Checks creation requests and hands accepted ones to the registry
pub struct EtlService {
    registry: Arc<dyn EtlDatasourcePort>,
    rule: ColumnNameRule,
    max_chunk_size: u32,
}

impl EtlService {
    pub fn new(registry: Arc<dyn EtlDatasourcePort>, rule: ColumnNameRule, max_chunk_size: u32) -> Self {
        Self {
            registry,
            rule,
            max_chunk_size,
        }
    }

    pub async fn create(&self, request: CreateEtlRequest) -> Result<EtlDatasource, EtlError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(EtlError::MissingField("name".to_string()));
        }
        if request.sql.trim().is_empty() {
            return Err(EtlError::MissingField("sql".to_string()));
        }

        let chunk_size = request.chunk_size.parse(self.max_chunk_size)?;

        if request.columns.is_empty() {
            return Err(EtlError::NoColumns);
        }
        let offending = self.rule.offending(request.columns.keys());
        if !offending.is_empty() {
            return Err(EtlError::InvalidColumnNames(offending));
        }

        let datasource = EtlDatasource {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            chunk_size,
            columns: request.columns,
            sql: request.sql,
            db_id: request.db_id,
            created_at: chrono::Utc::now(),
        };

        let created = self.registry.insert(datasource).await?;
        tracing::info!(
            "Created ETL data source '{}' with {} columns (chunk size {})",
            created.name,
            created.columns.len(),
            created.chunk_size
        );
        Ok(created)
    }

    pub async fn list(&self) -> Vec<EtlDatasource> {
        self.registry.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::etl_registry::InMemoryEtlRegistry;
    use crate::domain::naming::DEFAULT_COLUMN_NAME_PATTERN;
    use crate::domain::{ColumnEdit, ColumnMap, ColumnType, RawChunkSize};

    fn service() -> EtlService {
        EtlService::new(
            Arc::new(InMemoryEtlRegistry::new()),
            ColumnNameRule::new(DEFAULT_COLUMN_NAME_PATTERN).unwrap(),
            10_000,
        )
    }

    fn request(name: &str, chunk_size: RawChunkSize, columns: &[&str]) -> CreateEtlRequest {
        let mut map = ColumnMap::new();
        for column in columns {
            map.insert(column.to_string(), ColumnEdit::default());
        }
        CreateEtlRequest {
            name: name.to_string(),
            chunk_size,
            columns: map,
            sql: "SELECT user_id, amount FROM sales".to_string(),
            db_id: 3,
        }
    }

    #[tokio::test]
    async fn test_create_parses_text_chunk_size() {
        let service = service();
        let mut req = request("sales", RawChunkSize::Text("500".to_string()), &["user_id", "amount"]);
        req.columns.get_mut("amount").unwrap().column_type = Some(ColumnType::Numeric);

        let created = service.create(req).await.unwrap();
        assert_eq!(created.chunk_size, 500);
        assert_eq!(created.db_id, 3);
        assert_eq!(
            created.columns.keys().collect::<Vec<_>>(),
            vec!["user_id", "amount"]
        );
        assert_eq!(created.columns["amount"].column_type, Some(ColumnType::Numeric));
        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_blank_name() {
        let result = service()
            .create(request("  ", RawChunkSize::Number(10), &["a"]))
            .await;
        assert!(matches!(result, Err(EtlError::MissingField(f)) if f == "name"));
    }

    #[tokio::test]
    async fn test_rejects_bad_chunk_size() {
        let service = service();
        let result = service
            .create(request("ds", RawChunkSize::Text("ten".to_string()), &["a"]))
            .await;
        assert!(matches!(result, Err(EtlError::InvalidChunkSize(_))));

        let result = service
            .create(request("ds", RawChunkSize::Number(20_000), &["a"]))
            .await;
        assert!(matches!(result, Err(EtlError::ChunkSizeTooLarge { .. })));
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_empty_columns() {
        let result = service()
            .create(request("ds", RawChunkSize::Number(10), &[]))
            .await;
        assert!(matches!(result, Err(EtlError::NoColumns)));
    }

    #[tokio::test]
    async fn test_rejects_invalid_column_names() {
        let result = service()
            .create(request("ds", RawChunkSize::Number(10), &["user id", "amount", "count(*)"]))
            .await;
        match result {
            Err(EtlError::InvalidColumnNames(names)) => {
                assert_eq!(names, vec!["user id", "count(*)"]);
            }
            other => panic!("expected invalid column names, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let service = service();
        service
            .create(request("sales", RawChunkSize::Number(10), &["a"]))
            .await
            .unwrap();
        let result = service
            .create(request("sales", RawChunkSize::Number(10), &["a"]))
            .await;
        assert!(matches!(result, Err(EtlError::Duplicate(_))));
    }
}
