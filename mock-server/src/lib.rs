//! In-process stand-in for an ArangoDB server, used by the core crate's
//! integration tests.
//!
//! Implements just enough of the `/_db/{db}/_api` surface to exercise every
//! HTTP verb the client exposes: version lookup, collection create/get/drop,
//! and document CRUD with revision tags. Every route demands the stock
//! `root` / empty-password basic auth and answers with ArangoDB-shaped JSON
//! error bodies. Unknown paths fall through to a plain-text 404, the way a
//! misconfigured proxy in front of the database would.
//!
//! The `{db}` path segment is accepted but not interpreted; the mock serves
//! one shared store regardless of database name.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize)]
pub struct CollectionInfo {
    pub id: String,
    pub name: String,
    pub status: u8,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(rename = "isSystem")]
    pub is_system: bool,
}

#[derive(Default)]
pub struct Store {
    collections: HashMap<String, CollectionInfo>,
    /// Full documents (system fields included), keyed by `{collection}/{key}`.
    documents: HashMap<String, Value>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/_db/{db}/_api/version", get(version))
        .route("/_db/{db}/_api/collection", post(create_collection))
        .route(
            "/_db/{db}/_api/collection/{name}",
            get(get_collection).delete(drop_collection),
        )
        .route("/_db/{db}/_api/document/{collection}", post(create_document))
        .route(
            "/_db/{db}/_api/document/{collection}/{key}",
            get(get_document)
                .put(replace_document)
                .patch(update_document)
                .delete(remove_document),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(require_basic_auth))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// ArangoDB-shaped error body.
fn arango_error(code: u16, error_num: u32, message: &str) -> Value {
    json!({
        "error": true,
        "errorNum": error_num,
        "errorMessage": message,
        "code": code,
    })
}

/// Reject anything not authenticated as `root` with an empty password.
async fn require_basic_auth(req: Request, next: Next) -> Response {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .and_then(|v| STANDARD.decode(v).ok())
        .is_some_and(|raw| raw == b"root:");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(arango_error(401, 11, "not authorized to execute this request")),
        )
            .into_response();
    }
    next.run(req).await
}

/// Plain-text body on purpose: unknown paths simulate a non-JSON error page.
async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}

async fn version() -> Json<Value> {
    Json(json!({"server": "arango", "version": "2.2.1"}))
}

async fn create_collection(
    State(db): State<Db>,
    Json(input): Json<Value>,
) -> Response {
    let Some(name) = input.get("name").and_then(Value::as_str) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(arango_error(400, 1208, "name must be non-empty")),
        )
            .into_response();
    };
    let mut store = db.write().await;
    if store.collections.contains_key(name) {
        return (
            StatusCode::CONFLICT,
            Json(arango_error(409, 1207, "duplicate name")),
        )
            .into_response();
    }
    let info = CollectionInfo {
        id: Uuid::new_v4().simple().to_string(),
        name: name.to_string(),
        status: 3,
        kind: 2,
        is_system: false,
    };
    let body = collection_body(&info);
    store.collections.insert(info.name.clone(), info);
    Json(body).into_response()
}

async fn get_collection(
    State(db): State<Db>,
    Path((_db, name)): Path<(String, String)>,
) -> Response {
    let store = db.read().await;
    match store.collections.get(&name) {
        Some(info) => Json(collection_body(info)).into_response(),
        None => collection_not_found(),
    }
}

async fn drop_collection(
    State(db): State<Db>,
    Path((_db, name)): Path<(String, String)>,
) -> Response {
    let mut store = db.write().await;
    match store.collections.remove(&name) {
        Some(info) => {
            let prefix = format!("{name}/");
            store.documents.retain(|handle, _| !handle.starts_with(&prefix));
            Json(json!({"error": false, "code": 200, "id": info.id})).into_response()
        }
        None => collection_not_found(),
    }
}

async fn create_document(
    State(db): State<Db>,
    Path((_db, collection)): Path<(String, String)>,
    Json(input): Json<Value>,
) -> Response {
    let Value::Object(mut doc) = input else {
        return (
            StatusCode::BAD_REQUEST,
            Json(arango_error(400, 600, "request body is not a json object")),
        )
            .into_response();
    };
    let mut store = db.write().await;
    if !store.collections.contains_key(&collection) {
        return collection_not_found();
    }
    let key = Uuid::new_v4().simple().to_string();
    let rev = Uuid::new_v4().simple().to_string();
    let handle = format!("{collection}/{key}");
    doc.insert("_id".to_string(), json!(handle));
    doc.insert("_key".to_string(), json!(key));
    doc.insert("_rev".to_string(), json!(rev));
    store.documents.insert(handle.clone(), Value::Object(doc));
    (
        StatusCode::CREATED,
        Json(json!({"_id": handle, "_key": key, "_rev": rev})),
    )
        .into_response()
}

async fn get_document(
    State(db): State<Db>,
    Path((_db, collection, key)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let store = db.read().await;
    let Some(doc) = store.documents.get(&format!("{collection}/{key}")) else {
        return document_not_found();
    };
    let rev = doc.get("_rev").and_then(Value::as_str).unwrap_or_default();
    let unchanged = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|tag| tag.trim_matches('"') == rev);
    if unchanged {
        return StatusCode::NOT_MODIFIED.into_response();
    }
    ([(header::ETAG, format!("\"{rev}\""))], Json(doc.clone())).into_response()
}

async fn replace_document(
    State(db): State<Db>,
    Path((_db, collection, key)): Path<(String, String, String)>,
    Json(input): Json<Value>,
) -> Response {
    let Value::Object(mut doc) = input else {
        return (
            StatusCode::BAD_REQUEST,
            Json(arango_error(400, 600, "request body is not a json object")),
        )
            .into_response();
    };
    let handle = format!("{collection}/{key}");
    let mut store = db.write().await;
    if !store.documents.contains_key(&handle) {
        return document_not_found();
    }
    let rev = Uuid::new_v4().simple().to_string();
    doc.insert("_id".to_string(), json!(handle));
    doc.insert("_key".to_string(), json!(key));
    doc.insert("_rev".to_string(), json!(rev));
    store.documents.insert(handle.clone(), Value::Object(doc));
    Json(json!({"_id": handle, "_key": key, "_rev": rev})).into_response()
}

async fn update_document(
    State(db): State<Db>,
    Path((_db, collection, key)): Path<(String, String, String)>,
    Json(input): Json<Value>,
) -> Response {
    let Value::Object(patch) = input else {
        return (
            StatusCode::BAD_REQUEST,
            Json(arango_error(400, 600, "request body is not a json object")),
        )
            .into_response();
    };
    let handle = format!("{collection}/{key}");
    let mut store = db.write().await;
    let Some(Value::Object(doc)) = store.documents.get_mut(&handle) else {
        return document_not_found();
    };
    for (field, value) in patch {
        doc.insert(field, value);
    }
    let rev = Uuid::new_v4().simple().to_string();
    doc.insert("_id".to_string(), json!(handle));
    doc.insert("_key".to_string(), json!(key));
    doc.insert("_rev".to_string(), json!(rev));
    Json(json!({"_id": handle, "_key": key, "_rev": rev})).into_response()
}

async fn remove_document(
    State(db): State<Db>,
    Path((_db, collection, key)): Path<(String, String, String)>,
) -> Response {
    let handle = format!("{collection}/{key}");
    let mut store = db.write().await;
    match store.documents.remove(&handle) {
        Some(_) => Json(json!({"error": false, "code": 200, "_id": handle})).into_response(),
        None => document_not_found(),
    }
}

fn collection_body(info: &CollectionInfo) -> Value {
    json!({
        "error": false,
        "code": 200,
        "id": info.id,
        "name": info.name,
        "status": info.status,
        "type": info.kind,
        "isSystem": info.is_system,
    })
}

fn collection_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(arango_error(404, 1203, "collection not found")),
    )
        .into_response()
}

fn document_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(arango_error(404, 1202, "document not found")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_body_uses_arango_field_names() {
        let info = CollectionInfo {
            id: "123".to_string(),
            name: "users".to_string(),
            status: 3,
            kind: 2,
            is_system: false,
        };
        let body = collection_body(&info);
        assert_eq!(body["error"], false);
        assert_eq!(body["code"], 200);
        assert_eq!(body["type"], 2);
        assert_eq!(body["isSystem"], false);
    }

    #[test]
    fn arango_error_shape() {
        let err = arango_error(404, 1202, "document not found");
        assert_eq!(err["error"], true);
        assert_eq!(err["errorNum"], 1202);
        assert_eq!(err["errorMessage"], "document not found");
        assert_eq!(err["code"], 404);
    }
}
