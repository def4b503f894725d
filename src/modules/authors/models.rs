use bookshelf_http::error::AppError;
use serde::Deserialize;

use crate::modules::Violations;

/// Request body for creating or renaming an author.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorRequest {
    /// Full name of the author
    pub name: String,
}

impl AuthorRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        Violations::default()
            .not_blank("name", &self.name)
            .finish("invalid author request")
    }
}

/// Query string of `GET /author/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSearchQuery {
    pub query: String,
}
