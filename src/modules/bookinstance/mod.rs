pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use biblio_http::resource::{crud_paths, crud_router};
use biblio_kernel::{InitCtx, Module};
use biblio_store::Table;

use models::BookInstance;

/// Book instances resource: uniform CRUD over the physical-copy table
pub struct BookInstanceModule {
    table: Arc<Table<BookInstance>>,
}

impl BookInstanceModule {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Table::new()),
        }
    }
}

impl Default for BookInstanceModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BookInstanceModule {
    fn name(&self) -> &'static str {
        "bookinstance"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "bookinstance table ready"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        crud_router(self.table.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": crud_paths("BookInstances", "BookInstance", "NewBookInstance"),
            "components": {
                "schemas": {
                    "BookInstance": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Storage-assigned identifier"
                            },
                            "book": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Id of the Book this copy belongs to"
                            },
                            "imprint": {
                                "type": "string"
                            },
                            "due_back": {
                                "type": "string",
                                "format": "date",
                                "nullable": true
                            },
                            "status": {
                                "type": "string",
                                "enum": ["m", "o", "a", "r"],
                                "description": "m maintenance, o on loan, a available, r reserved"
                            }
                        },
                        "required": ["id", "book", "imprint", "status"]
                    },
                    "NewBookInstance": {
                        "type": "object",
                        "properties": {
                            "book": {
                                "type": "integer",
                                "format": "int64"
                            },
                            "imprint": {
                                "type": "string"
                            },
                            "due_back": {
                                "type": "string",
                                "format": "date",
                                "nullable": true
                            },
                            "status": {
                                "type": "string",
                                "enum": ["m", "o", "a", "r"]
                            }
                        },
                        "required": ["book", "imprint", "status"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the bookinstance module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BookInstanceModule::new())
}
