pub mod models;
pub mod routes;
pub mod search;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_db::EntityStore;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use crate::search::SearchDispatcher;
use routes::BookState;

/// Book management module: CRUD plus the book search queries
pub struct BooksModule {
    state: BookState,
}

impl BooksModule {
    pub fn new(store: Arc<dyn EntityStore>) -> anyhow::Result<Self> {
        let registry = search::registry()?;
        let dispatcher = SearchDispatcher::new("Book", registry, Arc::clone(&store));
        Ok(Self {
            state: BookState {
                store,
                search: Arc::new(dispatcher),
            },
        })
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "book"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            queries = ?self.state.search.registry().names(),
            "book module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let queries = self.state.search.registry().names();
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "description": "ID of the book",
            "schema": { "type": "integer", "format": "int64" }
        });
        let date_param = |name: &str, description: &str| {
            json!({
                "name": name,
                "in": "query",
                "required": false,
                "description": description,
                "schema": { "type": "string", "format": "date" }
            })
        };

        Some(json!({
            "paths": {
                "/book": {
                    "get": {
                        "summary": "Get all books",
                        "tags": ["Book Management"],
                        "responses": {
                            "200": {
                                "description": "All books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a new book",
                        "tags": ["Book Management"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                                }
                            }
                        },
                        "responses": {
                            "201": book("Book created successfully"),
                            "400": error("Malformed request body"),
                            "404": error("Author does not exist"),
                            "422": error("Validation error")
                        }
                    }
                },
                "/book/{id}": {
                    "get": {
                        "summary": "Get a book by ID",
                        "tags": ["Book Management"],
                        "parameters": [id_param.clone()],
                        "responses": {
                            "200": book("Book found"),
                            "404": error("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Update an existing book",
                        "tags": ["Book Management"],
                        "parameters": [id_param],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UpdateBook" }
                                }
                            }
                        },
                        "responses": {
                            "200": book("Book updated successfully"),
                            "404": error("Book not found"),
                            "422": error("Validation error")
                        }
                    }
                },
                "/book/search": {
                    "get": {
                        "summary": "Search for books",
                        "description": "`by-date` returns a list; every other query returns a single book.",
                        "tags": ["Book Management"],
                        "parameters": [
                            {
                                "name": "query",
                                "in": "query",
                                "required": true,
                                "description": "The search query type",
                                "schema": { "type": "string", "enum": queries },
                                "example": "longest"
                            },
                            date_param("fromDate", "Start date for a 'by-date' search (inclusive). Format: YYYY-MM-DD."),
                            date_param("toDate", "End date for a 'by-date' search (inclusive). Format: YYYY-MM-DD.")
                        ],
                        "responses": {
                            "200": {
                                "description": "Matching book, or list of books for 'by-date'",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "oneOf": [
                                                { "$ref": "#/components/schemas/Book" },
                                                {
                                                    "type": "array",
                                                    "items": { "$ref": "#/components/schemas/Book" }
                                                }
                                            ]
                                        }
                                    }
                                }
                            },
                            "400": error("Unknown query or malformed date"),
                            "404": error("No book matches the query")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "authorId": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "pages": { "type": "integer", "format": "int32", "minimum": 1 },
                            "publicationDate": { "type": "string", "format": "date" },
                            "createdDate": { "type": "string", "format": "date-time" },
                            "lastModifiedDate": { "type": "string", "format": "date-time" }
                        },
                        "required": [
                            "id", "authorId", "title", "pages",
                            "publicationDate", "createdDate", "lastModifiedDate"
                        ]
                    },
                    "CreateBook": {
                        "type": "object",
                        "description": "Request object for creating a book",
                        "properties": {
                            "authorId": { "type": "integer", "format": "int64", "example": 1 },
                            "title": { "type": "string", "example": "The Hobbit" },
                            "pages": { "type": "integer", "format": "int32", "minimum": 1, "example": 310 },
                            "publicationDate": { "type": "string", "format": "date", "example": "1937-09-21" }
                        },
                        "required": ["authorId", "title", "pages", "publicationDate"]
                    },
                    "UpdateBook": {
                        "type": "object",
                        "description": "Request object for updating a book",
                        "properties": {
                            "title": { "type": "string", "example": "The Hobbit" },
                            "pages": { "type": "integer", "format": "int32", "minimum": 1, "example": 310 },
                            "publicationDate": { "type": "string", "format": "date", "example": "1937-09-21" }
                        },
                        "required": ["title", "pages", "publicationDate"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module stopped");
        Ok(())
    }
}

/// Create a new instance of the book module
pub fn create_module(store: Arc<dyn EntityStore>) -> anyhow::Result<Arc<dyn Module>> {
    Ok(Arc::new(BooksModule::new(store)?))
}
