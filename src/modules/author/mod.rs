pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use biblio_http::resource::{crud_paths, crud_router};
use biblio_kernel::{InitCtx, Module};
use biblio_store::Table;

use models::Author;

/// Authors resource: uniform CRUD over the author table
pub struct AuthorModule {
    table: Arc<Table<Author>>,
}

impl AuthorModule {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Table::new()),
        }
    }
}

impl Default for AuthorModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for AuthorModule {
    fn name(&self) -> &'static str {
        "author"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "author table ready"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        crud_router(self.table.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": crud_paths("Authors", "Author", "NewAuthor"),
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Storage-assigned identifier"
                            },
                            "first_name": {
                                "type": "string"
                            },
                            "last_name": {
                                "type": "string"
                            },
                            "date_of_birth": {
                                "type": "string",
                                "format": "date",
                                "nullable": true
                            },
                            "date_of_death": {
                                "type": "string",
                                "format": "date",
                                "nullable": true
                            }
                        },
                        "required": ["id", "first_name", "last_name"]
                    },
                    "NewAuthor": {
                        "type": "object",
                        "properties": {
                            "first_name": {
                                "type": "string"
                            },
                            "last_name": {
                                "type": "string"
                            },
                            "date_of_birth": {
                                "type": "string",
                                "format": "date",
                                "nullable": true
                            },
                            "date_of_death": {
                                "type": "string",
                                "format": "date",
                                "nullable": true
                            }
                        },
                        "required": ["first_name", "last_name"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the author module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(AuthorModule::new())
}
