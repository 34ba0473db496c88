pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use biblio_http::resource::{crud_paths, crud_router};
use biblio_kernel::{InitCtx, Module};
use biblio_store::Table;

use models::Book;

/// Books resource: uniform CRUD over the book table
pub struct BookModule {
    table: Arc<Table<Book>>,
}

impl BookModule {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Table::new()),
        }
    }
}

impl Default for BookModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BookModule {
    fn name(&self) -> &'static str {
        "book"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "book table ready"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        crud_router(self.table.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": crud_paths("Books", "Book", "NewBook"),
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Storage-assigned identifier"
                            },
                            "title": {
                                "type": "string"
                            },
                            "author": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Id of the authoring Author"
                            },
                            "summary": {
                                "type": "string"
                            },
                            "isbn": {
                                "type": "string"
                            },
                            "genre": {
                                "type": "array",
                                "items": {
                                    "type": "integer",
                                    "format": "int64"
                                },
                                "description": "Ids of the genres this book belongs to"
                            },
                            "language": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Id of the Language"
                            }
                        },
                        "required": ["id", "title", "author", "summary", "isbn", "genre", "language"]
                    },
                    "NewBook": {
                        "type": "object",
                        "properties": {
                            "title": {
                                "type": "string"
                            },
                            "author": {
                                "type": "integer",
                                "format": "int64"
                            },
                            "summary": {
                                "type": "string"
                            },
                            "isbn": {
                                "type": "string"
                            },
                            "genre": {
                                "type": "array",
                                "items": {
                                    "type": "integer",
                                    "format": "int64"
                                }
                            },
                            "language": {
                                "type": "integer",
                                "format": "int64"
                            }
                        },
                        "required": ["title", "author", "summary", "isbn", "language"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the book module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BookModule::new())
}
