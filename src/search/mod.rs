//! Named search queries.
//!
//! Each query is a stateless [`SearchHandler`] registered under a unique
//! name. A [`SearchRegistry`] indexes the handlers once at startup and a
//! [`SearchDispatcher`] resolves request names against it.

use async_trait::async_trait;
use bookshelf_db::{DateRange, EntityStore, StoreError};

pub mod dispatcher;
pub mod registry;

pub use dispatcher::{SearchDispatcher, SearchError, SearchResult};
pub use registry::{QueryRegistryError, SearchRegistry};

/// Parameters a handler may consult. Handlers ignore what they do not use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub published: DateRange,
}

/// Raw handler output, before the dispatcher maps absence to an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<T> {
    /// Single-record query; `None` when nothing matched.
    Single(Option<T>),
    /// Multi-record query; may be empty.
    Multiple(Vec<T>),
}

/// A named, read-only query over the entity store.
#[async_trait]
pub trait SearchHandler<T: Send>: Send + Sync {
    /// Exact, case-sensitive name the query is requested by.
    fn name(&self) -> &'static str;

    async fn search(
        &self,
        store: &dyn EntityStore,
        params: &SearchParams,
    ) -> Result<SearchOutcome<T>, StoreError>;
}
