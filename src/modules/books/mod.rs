pub mod models;

use async_trait::async_trait;
use axum::{
    extract::{rejection::QueryRejection, Query},
    routing::get,
    Json, Router,
};
use serde_json::json;
use shelf_catalog::{Book, Locale, PAGE_SIZE};
use shelf_http::error::AppError;
use shelf_kernel::{InitCtx, Module};

use models::BooksParams;

/// Serves deterministic pages of generated books
pub struct BooksModule;

impl BooksModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    /// Clients address the catalog as a top-level `/books` resource.
    fn base_path(&self) -> String {
        "/books".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let locales: Vec<&str> = Locale::ALL.iter().map(|l| l.code()).collect();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            page_size = PAGE_SIZE,
            ?locales,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books))
            .route("/health", get(health_check))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Generate one page of books",
                        "description": "Returns 20 books for the given seed and page. The same seed and page always yield the same page; an empty array signals exhaustion.",
                        "tags": ["Books"],
                        "parameters": [
                            query_parameter("seed", "string", "Seed anchoring the page stream (default `default`)"),
                            query_parameter("page", "integer", "1-based page number (default 1)"),
                            query_parameter("language", "string", "Language tag: en, de or fr; others fall back to en"),
                            query_parameter("likes", "number", "Target average of likes per book (default 0)"),
                            query_parameter("reviews", "number", "Target average of reviews per book (default 0)")
                        ],
                        "responses": {
                            "200": {
                                "description": "Page of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed query string",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Review": {
                        "type": "object",
                        "properties": {
                            "reviewer": { "type": "string" },
                            "text": { "type": "string" }
                        },
                        "required": ["reviewer", "text"]
                    },
                    "Book": {
                        "type": "object",
                        "properties": {
                            "index": { "type": "integer", "description": "1-based position across all pages" },
                            "isbn": { "type": "string", "description": "Generated digits suffixed with the offset in the page" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "publisher": { "type": "string" },
                            "language": { "type": "string", "description": "Requested language tag, verbatim" },
                            "likes": { "type": "integer" },
                            "reviews": { "type": "integer" },
                            "cover": { "type": "string", "format": "uri" },
                            "reviewsData": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Review" }
                            }
                        },
                        "required": [
                            "index", "isbn", "title", "author", "publisher", "language",
                            "likes", "reviews", "cover", "reviewsData"
                        ]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

fn query_parameter(name: &str, kind: &str, description: &str) -> serde_json::Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": description,
        "schema": { "type": kind }
    })
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

/// Generate the requested page
async fn list_books(
    params: Result<Query<BooksParams>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(params) = params.map_err(|rejection| {
        AppError::bad_request("malformed query string")
            .with_details(vec![json!({ "error": rejection.body_text() })])
    })?;

    let query = params.into_catalog_query();
    Ok(Json(shelf_catalog::generate(&query)))
}

/// Create a new instance of the books module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}
