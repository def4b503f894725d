//! In-process [`EntityStore`] backed by id-ordered maps behind a single lock.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use time::{Duration, OffsetDateTime};

use crate::models::{Author, AuthorId, Book, BookChanges, BookId, DateRange, NewBook};
use crate::{EntityStore, StoreError};

#[derive(Debug, Clone)]
struct AuthorRow {
    id: AuthorId,
    name: String,
    book_ids: BTreeSet<BookId>,
    created_date: OffsetDateTime,
    last_modified_date: OffsetDateTime,
}

/// Hands out strictly increasing UTC timestamps.
#[derive(Debug, Default)]
struct Clock {
    last: Option<OffsetDateTime>,
}

impl Clock {
    fn tick(&mut self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        let stamp = match self.last {
            Some(prev) if now <= prev => prev + Duration::microseconds(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }
}

#[derive(Debug, Default)]
struct Tables {
    authors: BTreeMap<AuthorId, AuthorRow>,
    books: BTreeMap<BookId, Book>,
    last_author_id: AuthorId,
    last_book_id: BookId,
    clock: Clock,
}

impl Tables {
    fn author(&self, row: &AuthorRow) -> Author {
        Author {
            id: row.id,
            name: row.name.clone(),
            books: row
                .book_ids
                .iter()
                .filter_map(|id| self.books.get(id).cloned())
                .collect(),
            created_date: row.created_date,
            last_modified_date: row.last_modified_date,
        }
    }
}

/// Thread-safe in-memory entity store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn list_authors(&self) -> Result<Vec<Author>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .authors
            .values()
            .map(|row| tables.author(row))
            .collect())
    }

    async fn find_author(&self, id: AuthorId) -> Result<Option<Author>, StoreError> {
        let tables = self.tables.read();
        Ok(tables.authors.get(&id).map(|row| tables.author(row)))
    }

    async fn insert_author(&self, name: String) -> Result<Author, StoreError> {
        let mut tables = self.tables.write();
        let now = tables.clock.tick();
        tables.last_author_id += 1;
        let row = AuthorRow {
            id: tables.last_author_id,
            name,
            book_ids: BTreeSet::new(),
            created_date: now,
            last_modified_date: now,
        };
        tracing::debug!(author_id = row.id, "author inserted");
        let author = tables.author(&row);
        tables.authors.insert(row.id, row);
        Ok(author)
    }

    async fn update_author(
        &self,
        id: AuthorId,
        name: String,
    ) -> Result<Option<Author>, StoreError> {
        let mut tables = self.tables.write();
        if !tables.authors.contains_key(&id) {
            return Ok(None);
        }
        let now = tables.clock.tick();
        let Some(row) = tables.authors.get_mut(&id) else {
            return Ok(None);
        };
        row.name = name;
        row.last_modified_date = now;
        let row = row.clone();
        tracing::debug!(author_id = id, "author updated");
        Ok(Some(tables.author(&row)))
    }

    async fn delete_author(&self, id: AuthorId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write();
        let Some(row) = tables.authors.remove(&id) else {
            return Ok(false);
        };
        for book_id in &row.book_ids {
            tables.books.remove(book_id);
        }
        tracing::debug!(
            author_id = id,
            removed_books = row.book_ids.len(),
            "author deleted"
        );
        Ok(true)
    }

    async fn author_with_most_books(&self) -> Result<Option<Author>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .authors
            .values()
            .max_by(|a, b| {
                a.book_ids
                    .len()
                    .cmp(&b.book_ids.len())
                    .then_with(|| b.id.cmp(&a.id))
            })
            .map(|row| tables.author(row)))
    }

    async fn last_modified_author(&self) -> Result<Option<Author>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .authors
            .values()
            .max_by_key(|row| (row.last_modified_date, row.id))
            .map(|row| tables.author(row)))
    }

    async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.tables.read().books.values().cloned().collect())
    }

    async fn find_book(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        Ok(self.tables.read().books.get(&id).cloned())
    }

    async fn insert_book(&self, book: NewBook) -> Result<Book, StoreError> {
        let mut tables = self.tables.write();
        if !tables.authors.contains_key(&book.author_id) {
            return Err(StoreError::UnknownAuthor(book.author_id));
        }

        let now = tables.clock.tick();
        tables.last_book_id += 1;
        let record = Book {
            id: tables.last_book_id,
            author_id: book.author_id,
            title: book.title,
            pages: book.pages,
            publication_date: book.publication_date,
            created_date: now,
            last_modified_date: now,
        };

        // The owning author's own timestamps are left untouched.
        if let Some(owner) = tables.authors.get_mut(&record.author_id) {
            owner.book_ids.insert(record.id);
        }
        tables.books.insert(record.id, record.clone());
        tracing::debug!(
            book_id = record.id,
            author_id = record.author_id,
            "book inserted"
        );
        Ok(record)
    }

    async fn update_book(
        &self,
        id: BookId,
        changes: BookChanges,
    ) -> Result<Option<Book>, StoreError> {
        let mut tables = self.tables.write();
        if !tables.books.contains_key(&id) {
            return Ok(None);
        }
        let now = tables.clock.tick();
        let Some(book) = tables.books.get_mut(&id) else {
            return Ok(None);
        };
        book.title = changes.title;
        book.pages = changes.pages;
        book.publication_date = changes.publication_date;
        book.last_modified_date = now;
        tracing::debug!(book_id = id, "book updated");
        Ok(Some(book.clone()))
    }

    async fn longest_book(&self) -> Result<Option<Book>, StoreError> {
        Ok(self
            .tables
            .read()
            .books
            .values()
            .max_by(|a, b| a.pages.cmp(&b.pages).then_with(|| b.id.cmp(&a.id)))
            .cloned())
    }

    async fn oldest_book(&self) -> Result<Option<Book>, StoreError> {
        Ok(self
            .tables
            .read()
            .books
            .values()
            .min_by_key(|book| (book.publication_date, book.id))
            .cloned())
    }

    async fn last_modified_book(&self) -> Result<Option<Book>, StoreError> {
        Ok(self
            .tables
            .read()
            .books
            .values()
            .max_by_key(|book| (book.last_modified_date, book.id))
            .cloned())
    }

    async fn books_published_within(&self, range: DateRange) -> Result<Vec<Book>, StoreError> {
        Ok(self
            .tables
            .read()
            .books
            .values()
            .filter(|book| range.contains(book.publication_date))
            .cloned()
            .collect())
    }
}
