//! Generic CRUD routing over a record table.
//!
//! Every catalog resource exposes the same five operations: list and get
//! are open, create/update/delete require a session verdict from the
//! authentication collaborator. Handlers translate [`Table`] results into
//! responses and [`StoreError`] into [`AppError`].

use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{header, request::Parts, HeaderMap},
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;

use biblio_auth::Authenticator;
use biblio_store::{Record, Table};

use crate::error::AppError;

/// Extractor that rejects a request unless the authentication collaborator
/// vouches for its session token.
///
/// Runs before the body is touched, so a rejected write never reaches the
/// table.
pub struct SessionGuard;

impl<S> FromRequestParts<S> for SessionGuard
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authenticator = parts
            .extensions
            .get::<Arc<dyn Authenticator>>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("no authentication collaborator configured"))?;

        let token = bearer_token(&parts.headers);
        if authenticator
            .authenticate(token.as_deref())
            .await
            .is_authenticated()
        {
            Ok(Self)
        } else {
            Err(AppError::unauthorized(
                "a valid session token is required for write operations",
            ))
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// JSON body extractor that reports schema failures in the standard error
/// envelope instead of axum's plain-text rejection.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(
                vec![json!({"error": rejection.body_text()})],
                "request body does not match the resource schema",
            )),
        }
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("invalid record id '{raw}'")))
}

/// Build the uniform five-operation router for one resource table.
///
/// | Method | Path    | Auth     | Operation                |
/// |--------|---------|----------|--------------------------|
/// | GET    | `/`     | none     | list                     |
/// | GET    | `/{id}` | none     | get by id                |
/// | POST   | `/`     | required | create                   |
/// | PUT    | `/{id}` | required | full-replace update      |
/// | DELETE | `/{id}` | required | delete                   |
pub fn crud_router<R>(table: Arc<Table<R>>) -> Router
where
    R: Record + Serialize,
    R::Draft: DeserializeOwned,
{
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/{id}",
            get(fetch::<R>).put(update::<R>).delete(remove::<R>),
        )
        .with_state(table)
}

async fn list<R>(State(table): State<Arc<Table<R>>>) -> Json<Vec<R>>
where
    R: Record + Serialize,
{
    Json(table.list().await)
}

async fn fetch<R>(
    State(table): State<Arc<Table<R>>>,
    Path(id): Path<String>,
) -> Result<Json<R>, AppError>
where
    R: Record + Serialize,
{
    let id = parse_id(&id)?;
    Ok(Json(table.get(id).await?))
}

async fn create<R>(
    State(table): State<Arc<Table<R>>>,
    _session: SessionGuard,
    ValidJson(draft): ValidJson<R::Draft>,
) -> Json<R>
where
    R: Record + Serialize,
    R::Draft: DeserializeOwned,
{
    Json(table.insert(draft).await)
}

async fn update<R>(
    State(table): State<Arc<Table<R>>>,
    Path(id): Path<String>,
    _session: SessionGuard,
    ValidJson(draft): ValidJson<R::Draft>,
) -> Result<Json<R>, AppError>
where
    R: Record + Serialize,
    R::Draft: DeserializeOwned,
{
    let id = parse_id(&id)?;
    Ok(Json(table.replace(id, draft).await?))
}

async fn remove<R>(
    State(table): State<Arc<Table<R>>>,
    Path(id): Path<String>,
    _session: SessionGuard,
) -> Result<Json<serde_json::Value>, AppError>
where
    R: Record + Serialize,
{
    let id = parse_id(&id)?;
    table.remove(id).await?;
    Ok(Json(json!({"success": true})))
}

/// OpenAPI path items for the uniform CRUD surface of one resource.
///
/// `schema` and `draft` name the record and payload schemas the module
/// contributes under `components.schemas`.
pub fn crud_paths(tag: &str, schema: &str, draft: &str) -> serde_json::Value {
    let schema_ref = format!("#/components/schemas/{schema}");
    let draft_ref = format!("#/components/schemas/{draft}");
    let error_ref = "#/components/schemas/ErrorResponse";
    let id_parameter = || {
        json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        })
    };

    json!({
        "/": {
            "get": {
                "summary": format!("List every {schema}"),
                "tags": [tag],
                "responses": {
                    "200": {
                        "description": format!("All {schema} records in insertion order"),
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "array",
                                    "items": { "$ref": schema_ref }
                                }
                            }
                        }
                    }
                }
            },
            "post": {
                "summary": format!("Create a {schema}"),
                "tags": [tag],
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": { "$ref": draft_ref }
                        }
                    }
                },
                "responses": {
                    "200": {
                        "description": format!("Created {schema} with its assigned id"),
                        "content": {
                            "application/json": {
                                "schema": { "$ref": schema_ref }
                            }
                        }
                    },
                    "401": {
                        "description": "Missing or invalid session token",
                        "content": {
                            "application/json": { "schema": { "$ref": error_ref } }
                        }
                    },
                    "422": {
                        "description": "Body does not match the resource schema",
                        "content": {
                            "application/json": { "schema": { "$ref": error_ref } }
                        }
                    }
                }
            }
        },
        "/{id}": {
            "get": {
                "summary": format!("Get a {schema} by id"),
                "tags": [tag],
                "parameters": [id_parameter()],
                "responses": {
                    "200": {
                        "description": format!("The matching {schema}"),
                        "content": {
                            "application/json": {
                                "schema": { "$ref": schema_ref }
                            }
                        }
                    },
                    "404": {
                        "description": "No record with this id",
                        "content": {
                            "application/json": { "schema": { "$ref": error_ref } }
                        }
                    }
                }
            },
            "put": {
                "summary": format!("Replace every field of a {schema}"),
                "tags": [tag],
                "parameters": [id_parameter()],
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": { "$ref": draft_ref }
                        }
                    }
                },
                "responses": {
                    "200": {
                        "description": format!("The updated {schema}"),
                        "content": {
                            "application/json": {
                                "schema": { "$ref": schema_ref }
                            }
                        }
                    },
                    "401": {
                        "description": "Missing or invalid session token",
                        "content": {
                            "application/json": { "schema": { "$ref": error_ref } }
                        }
                    },
                    "404": {
                        "description": "No record with this id",
                        "content": {
                            "application/json": { "schema": { "$ref": error_ref } }
                        }
                    },
                    "422": {
                        "description": "Body does not match the resource schema",
                        "content": {
                            "application/json": { "schema": { "$ref": error_ref } }
                        }
                    }
                }
            },
            "delete": {
                "summary": format!("Delete a {schema} by id"),
                "tags": [tag],
                "parameters": [id_parameter()],
                "responses": {
                    "200": {
                        "description": "Acknowledgement of removal",
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "success": { "type": "boolean" }
                                    },
                                    "required": ["success"]
                                }
                            }
                        }
                    },
                    "401": {
                        "description": "Missing or invalid session token",
                        "content": {
                            "application/json": { "schema": { "$ref": error_ref } }
                        }
                    },
                    "404": {
                        "description": "No record with this id",
                        "content": {
                            "application/json": { "schema": { "$ref": error_ref } }
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::Extension;
    use serde::Deserialize;
    use tower::ServiceExt;

    use biblio_auth::SessionAuthenticator;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Tag {
        id: i64,
        name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct NewTag {
        name: String,
    }

    impl Record for Tag {
        type Draft = NewTag;

        fn assemble(id: i64, draft: NewTag) -> Self {
            Self {
                id,
                name: draft.name,
            }
        }

        fn id(&self) -> i64 {
            self.id
        }
    }

    fn router_with_auth() -> Router {
        let authenticator: Arc<dyn Authenticator> =
            Arc::new(SessionAuthenticator::new(["secret".to_string()]));
        crud_router(Arc::new(Table::<Tag>::new())).layer(Extension(authenticator))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_is_open_and_starts_empty() {
        let app = router_with_auth();
        let response = app
            .oneshot(HttpRequest::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn create_requires_session_token() {
        let app = router_with_auth();
        let response = app
            .oneshot(
                HttpRequest::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "Fantasy"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"]["code"], "unauthorized");
    }

    #[tokio::test]
    async fn create_with_token_assigns_id() {
        let app = router_with_auth();
        let response = app
            .oneshot(
                HttpRequest::post("/")
                    .header("content-type", "application/json")
                    .header("authorization", "Bearer secret")
                    .body(Body::from(r#"{"name": "Fantasy"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"id": 1, "name": "Fantasy"})
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = router_with_auth();
        let response = app
            .oneshot(
                HttpRequest::post("/")
                    .header("content-type", "application/json")
                    .header("authorization", "Bearer secret")
                    .body(Body::from(r#"{"title": "wrong field"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "validation_error"
        );
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_bad_request() {
        let app = router_with_auth();
        let response = app
            .oneshot(HttpRequest::get("/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_authenticator_extension_rejects_writes() {
        // A router without the auth layer must fail closed.
        let app = crud_router(Arc::new(Table::<Tag>::new()));
        let response = app
            .oneshot(
                HttpRequest::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "Fantasy"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn crud_paths_cover_both_route_templates() {
        let paths = crud_paths("Genres", "Genre", "NewGenre");
        assert!(paths.get("/").is_some());
        assert!(paths.get("/{id}").is_some());
        assert_eq!(
            paths["/"]["post"]["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/NewGenre"
        );
    }
}
