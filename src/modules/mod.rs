pub mod authors;
pub mod books;

use std::sync::Arc;

use bookshelf_db::{EntityStore, StoreError};
use bookshelf_http::error::AppError;
use bookshelf_kernel::ModuleRegistry;
use serde_json::{json, Value};

use crate::search::SearchError;

/// Register all project-specific modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    store: Arc<dyn EntityStore>,
) -> anyhow::Result<()> {
    registry.register(authors::create_module(Arc::clone(&store))?)?;
    registry.register(books::create_module(store)?)?;
    Ok(())
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::UnknownQuery(_) => AppError::bad_request(err.to_string()),
            SearchError::NoMatch { .. } => AppError::not_found(err.to_string()),
            SearchError::Store(inner) => store_failure(inner),
        }
    }
}

/// Storage failures that carry no request-level meaning.
pub(crate) fn store_failure(err: StoreError) -> AppError {
    AppError::Internal(anyhow::Error::new(err).context("entity store operation failed"))
}

/// Collects per-field request violations into a single validation error.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    details: Vec<Value>,
}

impl Violations {
    pub(crate) fn check(&mut self, ok: bool, field: &str, error: &str) -> &mut Self {
        if !ok {
            self.details.push(json!({ "field": field, "error": error }));
        }
        self
    }

    pub(crate) fn not_blank(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, "must not be blank")
    }

    pub(crate) fn finish(&mut self, message: &str) -> Result<(), AppError> {
        if self.details.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(std::mem::take(&mut self.details), message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn search_errors_map_to_distinct_statuses() {
        let unknown: AppError = SearchError::UnknownQuery("shortest".into()).into();
        let missing: AppError = SearchError::NoMatch {
            entity: "Book",
            query: "oldest".into(),
        }
        .into();
        let failed: AppError = SearchError::Store(StoreError::UnknownAuthor(3)).into();

        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn violations_collect_every_field() {
        let err = Violations::default()
            .not_blank("title", "  ")
            .check(false, "pages", "must be at least 1")
            .finish("invalid book")
            .unwrap_err();

        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details.len(), 2);
                assert_eq!(details[0]["field"], "title");
                assert_eq!(details[1]["field"], "pages");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn no_violations_pass() {
        assert!(Violations::default()
            .not_blank("name", "Le Guin")
            .finish("invalid author")
            .is_ok());
    }
}
