pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use biblio_http::resource::{crud_paths, crud_router};
use biblio_kernel::{InitCtx, Module};
use biblio_store::Table;

use models::Language;

/// Languages resource: uniform CRUD over the language table
pub struct LanguageModule {
    table: Arc<Table<Language>>,
}

impl LanguageModule {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Table::new()),
        }
    }
}

impl Default for LanguageModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for LanguageModule {
    fn name(&self) -> &'static str {
        "language"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "language table ready"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        crud_router(self.table.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": crud_paths("Languages", "Language", "NewLanguage"),
            "components": {
                "schemas": {
                    "Language": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Storage-assigned identifier"
                            },
                            "name": {
                                "type": "string"
                            }
                        },
                        "required": ["id", "name"]
                    },
                    "NewLanguage": {
                        "type": "object",
                        "properties": {
                            "name": {
                                "type": "string"
                            }
                        },
                        "required": ["name"]
                    }
                }
            }
        }))
    }
}

/// Create a new instance of the language module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(LanguageModule::new())
}
