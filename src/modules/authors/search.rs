//! Author search queries.

use async_trait::async_trait;
use bookshelf_db::{Author, EntityStore, StoreError};

use crate::search::{
    QueryRegistryError, SearchHandler, SearchOutcome, SearchParams, SearchRegistry,
};

/// Link-time registration of an author query.
pub struct AuthorSearch(pub &'static dyn SearchHandler<Author>);

inventory::collect!(AuthorSearch);

/// Build the registry from every submitted [`AuthorSearch`].
pub fn registry() -> Result<SearchRegistry<Author>, QueryRegistryError> {
    SearchRegistry::build(inventory::iter::<AuthorSearch>.into_iter().map(|entry| entry.0))
}

/// The author owning the most books.
pub struct MostBooks;

#[async_trait]
impl SearchHandler<Author> for MostBooks {
    fn name(&self) -> &'static str {
        "most-books"
    }

    async fn search(
        &self,
        store: &dyn EntityStore,
        _params: &SearchParams,
    ) -> Result<SearchOutcome<Author>, StoreError> {
        Ok(SearchOutcome::Single(store.author_with_most_books().await?))
    }
}

inventory::submit! { AuthorSearch(&MostBooks) }

/// The most recently created or updated author.
pub struct LastModifiedAuthor;

#[async_trait]
impl SearchHandler<Author> for LastModifiedAuthor {
    fn name(&self) -> &'static str {
        "last-modified"
    }

    async fn search(
        &self,
        store: &dyn EntityStore,
        _params: &SearchParams,
    ) -> Result<SearchOutcome<Author>, StoreError> {
        Ok(SearchOutcome::Single(store.last_modified_author().await?))
    }
}

inventory::submit! { AuthorSearch(&LastModifiedAuthor) }
