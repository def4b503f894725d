use std::collections::HashMap;
use std::fmt;

use super::SearchHandler;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryRegistryError {
    #[error("search query '{0}' is registered more than once")]
    DuplicateName(&'static str),
}

/// Read-only name -> handler index, built once at startup.
pub struct SearchRegistry<T: Send + 'static> {
    handlers: HashMap<&'static str, &'static dyn SearchHandler<T>>,
}

impl<T: Send + 'static> SearchRegistry<T> {
    /// Index `handlers` by name. Two handlers sharing a name is an error.
    pub fn build<I>(handlers: I) -> Result<Self, QueryRegistryError>
    where
        I: IntoIterator<Item = &'static dyn SearchHandler<T>>,
    {
        let mut indexed = HashMap::new();
        for handler in handlers {
            if indexed.insert(handler.name(), handler).is_some() {
                return Err(QueryRegistryError::DuplicateName(handler.name()));
            }
        }
        Ok(Self { handlers: indexed })
    }

    pub fn resolve(&self, name: &str) -> Option<&'static dyn SearchHandler<T>> {
        self.handlers.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T: Send + 'static> fmt::Debug for SearchRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRegistry")
            .field("queries", &self.names())
            .finish()
    }
}
