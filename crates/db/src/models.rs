use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

pub type AuthorId = i64;
pub type BookId = i64;

/// An author together with the books it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Store-assigned identifier
    pub id: AuthorId,
    /// Full name of the author
    pub name: String,
    /// Owned books, ordered by book identifier
    pub books: Vec<Book>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_modified_date: OffsetDateTime,
}

/// A book record. `author_id` is a non-owning reference to the owning author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identifier
    pub id: BookId,
    /// Identifier of the owning author
    pub author_id: AuthorId,
    /// Title of the book
    pub title: String,
    /// Total number of pages
    pub pages: u32,
    /// Publication date, serialized as `YYYY-MM-DD`
    #[serde(with = "iso_date")]
    pub publication_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_modified_date: OffsetDateTime,
}

/// Fields required to insert a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub author_id: AuthorId,
    pub title: String,
    pub pages: u32,
    pub publication_date: Date,
}

/// Mutable fields of a book. Ownership never changes after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: String,
    pub pages: u32,
    pub publication_date: Date,
}

/// Inclusive publication date bounds; a missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    pub const fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Serde adapter for calendar dates in `YYYY-MM-DD` form.
pub mod iso_date {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::{format_description::FormatItem, macros::format_description, Date};

    pub const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn parse(value: &str) -> Result<Date, time::error::Parse> {
        Date::parse(value, FORMAT)
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    /// Optional variant; an empty string reads as `None`.
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => {
                    parse(raw.trim()).map(Some).map_err(D::Error::custom)
                }
                _ => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn date_range_bounds_are_inclusive() {
        let range = DateRange::new(Some(date!(2000 - 01 - 01)), Some(date!(2000 - 12 - 31)));
        assert!(range.contains(date!(2000 - 01 - 01)));
        assert!(range.contains(date!(2000 - 12 - 31)));
        assert!(!range.contains(date!(1999 - 12 - 31)));
        assert!(!range.contains(date!(2001 - 01 - 01)));
    }

    #[test]
    fn unbounded_range_contains_everything() {
        let range = DateRange::default();
        assert!(range.contains(date!(1066 - 10 - 14)));
        assert!(range.contains(date!(2999 - 01 - 01)));
    }

    #[test]
    fn book_serializes_with_camel_case_and_plain_dates() {
        let book = Book {
            id: 7,
            author_id: 3,
            title: "The Hobbit".to_string(),
            pages: 310,
            publication_date: date!(1937 - 09 - 21),
            created_date: OffsetDateTime::UNIX_EPOCH,
            last_modified_date: OffsetDateTime::UNIX_EPOCH,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["authorId"], 3);
        assert_eq!(value["publicationDate"], "1937-09-21");
        assert_eq!(value["createdDate"], "1970-01-01T00:00:00Z");

        let parsed: Book = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(iso_date::parse("1937-9-21").is_err());
        assert!(iso_date::parse("21/09/1937").is_err());
        assert!(iso_date::parse("1937-09-21").is_ok());
    }
}
