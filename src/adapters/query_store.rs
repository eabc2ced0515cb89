use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{EtlError, NewQuery, Query, QueryPort};

/// SQL Lab query history kept in memory, oldest first
#[derive(Clone, Default)]
pub struct InMemoryQueryStore {
    queries: Arc<RwLock<Vec<Query>>>,
}

impl InMemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueryPort for InMemoryQueryStore {
    async fn record_query(&self, query: NewQuery) -> Query {
        let query = query.into_query(uuid::Uuid::new_v4().to_string());
        let mut queries = self.queries.write().await;
        queries.push(query.clone());
        tracing::debug!("Recorded query {} ({} total)", query.id, queries.len());
        query
    }

    async fn get_query(&self, id: &str) -> Result<Query, EtlError> {
        let queries = self.queries.read().await;
        queries
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| EtlError::QueryNotFound(id.to_string()))
    }

    async fn list_queries(&self) -> Vec<Query> {
        self.queries.read().await.clone()
    }
}
