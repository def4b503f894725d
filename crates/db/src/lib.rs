//! Entity store for authors and books.
//!
//! [`EntityStore`] is the persistence seam used by the HTTP modules and the
//! search handlers. [`MemoryStore`] is the in-process implementation.

use async_trait::async_trait;

pub mod memory;
pub mod models;

pub use memory::MemoryStore;
pub use models::{Author, AuthorId, Book, BookChanges, BookId, DateRange, NewBook};

/// Errors raised by an [`EntityStore`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("author {0} does not exist")]
    UnknownAuthor(AuthorId),
}

/// Persistence operations for authors and books.
///
/// Single-record queries return `Ok(None)` when nothing matches; only
/// genuine storage failures surface as errors.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// All authors ordered by identifier.
    async fn list_authors(&self) -> Result<Vec<Author>, StoreError>;

    async fn find_author(&self, id: AuthorId) -> Result<Option<Author>, StoreError>;

    async fn insert_author(&self, name: String) -> Result<Author, StoreError>;

    /// Renames an author and refreshes its last-modified timestamp.
    async fn update_author(&self, id: AuthorId, name: String)
        -> Result<Option<Author>, StoreError>;

    /// Removes an author and every book it owns. Returns `false` if absent.
    async fn delete_author(&self, id: AuthorId) -> Result<bool, StoreError>;

    /// Author owning the most books; ties go to the lowest identifier.
    async fn author_with_most_books(&self) -> Result<Option<Author>, StoreError>;

    async fn last_modified_author(&self) -> Result<Option<Author>, StoreError>;

    /// All books ordered by identifier.
    async fn list_books(&self) -> Result<Vec<Book>, StoreError>;

    async fn find_book(&self, id: BookId) -> Result<Option<Book>, StoreError>;

    /// Inserts a book for an existing author. Nothing is persisted when the
    /// author is unknown.
    async fn insert_book(&self, book: NewBook) -> Result<Book, StoreError>;

    async fn update_book(
        &self,
        id: BookId,
        changes: BookChanges,
    ) -> Result<Option<Book>, StoreError>;

    /// Book with the highest page count; ties go to the lowest identifier.
    async fn longest_book(&self) -> Result<Option<Book>, StoreError>;

    /// Book with the earliest publication date; ties go to the lowest identifier.
    async fn oldest_book(&self) -> Result<Option<Book>, StoreError>;

    async fn last_modified_book(&self) -> Result<Option<Book>, StoreError>;

    /// Books published within `range`, ordered by identifier.
    async fn books_published_within(&self, range: DateRange) -> Result<Vec<Book>, StoreError>;
}
