//! Book search queries.

use async_trait::async_trait;
use bookshelf_db::{Book, EntityStore, StoreError};

use crate::search::{
    QueryRegistryError, SearchHandler, SearchOutcome, SearchParams, SearchRegistry,
};

/// Link-time registration of a book query.
pub struct BookSearch(pub &'static dyn SearchHandler<Book>);

inventory::collect!(BookSearch);

/// Build the registry from every submitted [`BookSearch`].
pub fn registry() -> Result<SearchRegistry<Book>, QueryRegistryError> {
    SearchRegistry::build(inventory::iter::<BookSearch>.into_iter().map(|entry| entry.0))
}

pub struct LongestBook;

#[async_trait]
impl SearchHandler<Book> for LongestBook {
    fn name(&self) -> &'static str {
        "longest"
    }

    async fn search(
        &self,
        store: &dyn EntityStore,
        _params: &SearchParams,
    ) -> Result<SearchOutcome<Book>, StoreError> {
        Ok(SearchOutcome::Single(store.longest_book().await?))
    }
}

inventory::submit! { BookSearch(&LongestBook) }

pub struct OldestBook;

#[async_trait]
impl SearchHandler<Book> for OldestBook {
    fn name(&self) -> &'static str {
        "oldest"
    }

    async fn search(
        &self,
        store: &dyn EntityStore,
        _params: &SearchParams,
    ) -> Result<SearchOutcome<Book>, StoreError> {
        Ok(SearchOutcome::Single(store.oldest_book().await?))
    }
}

inventory::submit! { BookSearch(&OldestBook) }

pub struct LastModifiedBook;

#[async_trait]
impl SearchHandler<Book> for LastModifiedBook {
    fn name(&self) -> &'static str {
        "last-modified"
    }

    async fn search(
        &self,
        store: &dyn EntityStore,
        _params: &SearchParams,
    ) -> Result<SearchOutcome<Book>, StoreError> {
        Ok(SearchOutcome::Single(store.last_modified_book().await?))
    }
}

inventory::submit! { BookSearch(&LastModifiedBook) }

/// Books published within the requested bounds; always a list.
pub struct BooksByDate;

#[async_trait]
impl SearchHandler<Book> for BooksByDate {
    fn name(&self) -> &'static str {
        "by-date"
    }

    async fn search(
        &self,
        store: &dyn EntityStore,
        params: &SearchParams,
    ) -> Result<SearchOutcome<Book>, StoreError> {
        Ok(SearchOutcome::Multiple(
            store.books_published_within(params.published).await?,
        ))
    }
}

inventory::submit! { BookSearch(&BooksByDate) }
