use bookshelf_db::{models::iso_date, AuthorId, BookChanges, DateRange, NewBook};
use bookshelf_http::error::AppError;
use serde::Deserialize;
use time::Date;

use crate::modules::Violations;
use crate::search::SearchParams;

/// Request body for creating a book.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    /// Identifier of the owning author
    pub author_id: AuthorId,
    pub title: String,
    pub pages: u32,
    /// `YYYY-MM-DD`
    #[serde(with = "iso_date")]
    pub publication_date: Date,
}

impl CreateBook {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_book(&self.title, self.pages)
    }

    pub fn into_new_book(self) -> NewBook {
        NewBook {
            author_id: self.author_id,
            title: self.title,
            pages: self.pages,
            publication_date: self.publication_date,
        }
    }
}

/// Request body for updating a book. Books never change owner, so an
/// `authorId` field, if present, is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub title: String,
    pub pages: u32,
    #[serde(with = "iso_date")]
    pub publication_date: Date,
}

impl UpdateBook {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_book(&self.title, self.pages)
    }

    pub fn into_changes(self) -> BookChanges {
        BookChanges {
            title: self.title,
            pages: self.pages,
            publication_date: self.publication_date,
        }
    }
}

fn validate_book(title: &str, pages: u32) -> Result<(), AppError> {
    Violations::default()
        .not_blank("title", title)
        .check(pages > 0, "pages", "must be at least 1")
        .finish("invalid book request")
}

/// Query string of `GET /book/search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSearchQuery {
    pub query: String,
    /// Inclusive lower bound for `by-date`
    #[serde(default, with = "iso_date::option")]
    pub from_date: Option<Date>,
    /// Inclusive upper bound for `by-date`
    #[serde(default, with = "iso_date::option")]
    pub to_date: Option<Date>,
}

impl BookSearchQuery {
    pub fn params(&self) -> SearchParams {
        SearchParams {
            published: DateRange::new(self.from_date, self.to_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn create_request_reads_camel_case() {
        let request: CreateBook = serde_json::from_value(serde_json::json!({
            "authorId": 4,
            "title": "The Hobbit",
            "pages": 310,
            "publicationDate": "1937-09-21"
        }))
        .unwrap();

        assert_eq!(request.author_id, 4);
        assert_eq!(request.publication_date, date!(1937 - 09 - 21));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn update_request_ignores_author_id() {
        let request: UpdateBook = serde_json::from_value(serde_json::json!({
            "authorId": 99,
            "title": "Renamed",
            "pages": 12,
            "publicationDate": "2020-02-29"
        }))
        .unwrap();

        assert_eq!(request.into_changes().title, "Renamed");
    }

    #[test]
    fn zero_pages_and_blank_title_are_rejected() {
        let request = UpdateBook {
            title: " ".to_string(),
            pages: 0,
            publication_date: date!(2020 - 01 - 01),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn search_query_dates_are_optional() {
        let query: BookSearchQuery = serde_json::from_value(serde_json::json!({
            "query": "by-date",
            "fromDate": "2001-01-01"
        }))
        .unwrap();

        assert_eq!(
            query.params().published,
            DateRange::new(Some(date!(2001 - 01 - 01)), None)
        );
    }
}
