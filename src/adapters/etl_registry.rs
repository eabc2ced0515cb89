use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{EtlDatasource, EtlDatasourcePort, EtlError};

/// Created ETL data sources, in creation order; names are unique
#[derive(Clone, Default)]
pub struct InMemoryEtlRegistry {
    datasources: Arc<RwLock<Vec<EtlDatasource>>>,
}

impl InMemoryEtlRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EtlDatasourcePort for InMemoryEtlRegistry {
    async fn insert(&self, datasource: EtlDatasource) -> Result<EtlDatasource, EtlError> {
        let mut datasources = self.datasources.write().await;
        if datasources.iter().any(|d| d.name == datasource.name) {
            return Err(EtlError::Duplicate(datasource.name));
        }
        datasources.push(datasource.clone());
        Ok(datasource)
    }

    async fn list(&self) -> Vec<EtlDatasource> {
        self.datasources.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnMap;

    fn datasource(name: &str) -> EtlDatasource {
        EtlDatasource {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            chunk_size: 1000,
            columns: ColumnMap::new(),
            sql: "SELECT 1".to_string(),
            db_id: 1,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let registry = InMemoryEtlRegistry::new();
        registry.insert(datasource("first")).await.unwrap();
        registry.insert(datasource("second")).await.unwrap();

        let names: Vec<String> = registry.list().await.into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let registry = InMemoryEtlRegistry::new();
        registry.insert(datasource("sales")).await.unwrap();

        let result = registry.insert(datasource("sales")).await;
        assert!(matches!(result, Err(EtlError::Duplicate(name)) if name == "sales"));
        assert_eq!(registry.list().await.len(), 1);
    }
}
