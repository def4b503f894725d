use std::sync::Arc;
use std::time::Instant;

use bookshelf_db::{EntityStore, StoreError};
use serde::Serialize;

use super::{SearchOutcome, SearchParams, SearchRegistry};

/// Dispatch result; keeps the handler's shape (object vs. list) on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResult<T> {
    One(T),
    Many(Vec<T>),
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// No handler is registered under the requested name.
    #[error("Invalid query parameter: {0}")]
    UnknownQuery(String),

    /// A single-record handler found nothing.
    #[error("{entity} not found for query: {query}")]
    NoMatch { entity: &'static str, query: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves query names through a [`SearchRegistry`] and runs them against
/// the store.
pub struct SearchDispatcher<T: Send + 'static> {
    entity: &'static str,
    registry: SearchRegistry<T>,
    store: Arc<dyn EntityStore>,
}

impl<T: Send + 'static> SearchDispatcher<T> {
    /// `entity` labels log lines and not-found messages (e.g. `"Book"`).
    pub fn new(
        entity: &'static str,
        registry: SearchRegistry<T>,
        store: Arc<dyn EntityStore>,
    ) -> Self {
        Self {
            entity,
            registry,
            store,
        }
    }

    pub fn registry(&self) -> &SearchRegistry<T> {
        &self.registry
    }

    pub async fn dispatch(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<SearchResult<T>, SearchError> {
        let Some(handler) = self.registry.resolve(query) else {
            tracing::warn!(entity = self.entity, query, "unknown search query");
            return Err(SearchError::UnknownQuery(query.to_string()));
        };

        let started = Instant::now();
        let outcome = handler.search(self.store.as_ref(), params).await?;
        let elapsed_us = started.elapsed().as_micros() as u64;

        match outcome {
            SearchOutcome::Single(Some(record)) => {
                tracing::info!(entity = self.entity, query, elapsed_us, "search matched");
                Ok(SearchResult::One(record))
            }
            SearchOutcome::Single(None) => {
                tracing::info!(entity = self.entity, query, elapsed_us, "search found nothing");
                Err(SearchError::NoMatch {
                    entity: self.entity,
                    query: query.to_string(),
                })
            }
            SearchOutcome::Multiple(records) => {
                tracing::info!(
                    entity = self.entity,
                    query,
                    elapsed_us,
                    matches = records.len(),
                    "search matched"
                );
                Ok(SearchResult::Many(records))
            }
        }
    }
}
