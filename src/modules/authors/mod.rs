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
use routes::AuthorState;

/// Author management module: CRUD plus the author search queries
pub struct AuthorsModule {
    state: AuthorState,
}

impl AuthorsModule {
    pub fn new(store: Arc<dyn EntityStore>) -> anyhow::Result<Self> {
        let registry = search::registry()?;
        let dispatcher = SearchDispatcher::new("Author", registry, Arc::clone(&store));
        Ok(Self {
            state: AuthorState {
                store,
                search: Arc::new(dispatcher),
            },
        })
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "author"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            queries = ?self.state.search.registry().names(),
            "author module initialized"
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
        let author = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Author" }
                    }
                }
            })
        };
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "description": "ID of the author",
            "schema": { "type": "integer", "format": "int64" }
        });
        let request_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/AuthorRequest" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/author": {
                    "get": {
                        "summary": "Get all authors",
                        "tags": ["Author Management"],
                        "responses": {
                            "200": {
                                "description": "All authors",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Author" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a new author",
                        "tags": ["Author Management"],
                        "requestBody": request_body.clone(),
                        "responses": {
                            "201": author("Author created successfully"),
                            "400": error("Malformed request body"),
                            "422": error("Validation error")
                        }
                    }
                },
                "/author/{id}": {
                    "get": {
                        "summary": "Get an author by ID",
                        "tags": ["Author Management"],
                        "parameters": [id_param.clone()],
                        "responses": {
                            "200": author("Author found"),
                            "404": error("Author not found")
                        }
                    },
                    "put": {
                        "summary": "Update an existing author",
                        "tags": ["Author Management"],
                        "parameters": [id_param],
                        "requestBody": request_body,
                        "responses": {
                            "200": author("Author updated successfully"),
                            "404": error("Author not found"),
                            "422": error("Validation error")
                        }
                    }
                },
                "/author/search": {
                    "get": {
                        "summary": "Search for an author",
                        "tags": ["Author Management"],
                        "parameters": [{
                            "name": "query",
                            "in": "query",
                            "required": true,
                            "description": "The search query type",
                            "schema": { "type": "string", "enum": queries },
                            "example": "most-books"
                        }],
                        "responses": {
                            "200": author("Matching author"),
                            "400": error("Unknown query"),
                            "404": error("No author matches the query")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "name": { "type": "string", "description": "Full name of the author" },
                            "books": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            },
                            "createdDate": { "type": "string", "format": "date-time" },
                            "lastModifiedDate": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "name", "books", "createdDate", "lastModifiedDate"]
                    },
                    "AuthorRequest": {
                        "type": "object",
                        "description": "Request object for creating or updating an author",
                        "properties": {
                            "name": {
                                "type": "string",
                                "description": "The full name of the author.",
                                "example": "J.R.R. Tolkien"
                            }
                        },
                        "required": ["name"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "author module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "author module stopped");
        Ok(())
    }
}

/// Create a new instance of the author module
pub fn create_module(store: Arc<dyn EntityStore>) -> anyhow::Result<Arc<dyn Module>> {
    Ok(Arc::new(AuthorsModule::new(store)?))
}
