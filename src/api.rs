//! HTTP routes
//!
//! | Method | Path        | Handler             |
//! |--------|-------------|---------------------|
//! | GET    | `/`         | [`root`]            |
//! | POST   | `/file/`    | [`write_file`]      |
//! | GET    | `/file/`    | [`read_file`]       |
//! | GET    | `/s3/file/` | [`read_s3_object`]  |
//! | POST   | `/s3/file/` | [`write_s3_object`] |

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::files::{self, FileWriteRequest};
use crate::objects::{self, ObjectReference};
use crate::settings::{parse_bool, Settings};

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/file/", get(read_file).post(write_file))
        .route("/s3/file/", get(read_s3_object).post(write_s3_object))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World!" }))
}

pub async fn write_file(Json(request): Json<FileWriteRequest>) -> Result<(StatusCode, Json<String>)> {
    let message = files::write_text_file(&request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[derive(Debug, Deserialize)]
pub struct ReadFileQuery {
    pub full_path: String,
}

pub async fn read_file(Query(query): Query<ReadFileQuery>) -> Result<Json<String>> {
    let content = files::read_text_file(&query.full_path).await?;
    Ok(Json(content))
}

/// Accepts the usual spellings of a boolean flag (`true`, `True`, `1`, `off`, ...)
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_bool(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid boolean value: {:?}", value)))
}

#[derive(Debug, Deserialize)]
pub struct ReadObjectQuery {
    #[serde(deserialize_with = "flag")]
    pub role_is_attached: bool,
    pub bucket_name: String,
    pub file_name: String,
}

pub async fn read_s3_object(
    State(state): State<AppState>,
    Query(query): Query<ReadObjectQuery>,
) -> Result<Json<String>> {
    let object = ObjectReference::new(query.bucket_name, query.file_name);
    let content = objects::read_object(&state.settings, query.role_is_attached, &object).await?;
    Ok(Json(content))
}

#[derive(Debug, Deserialize)]
pub struct WriteObjectQuery {
    #[serde(deserialize_with = "flag")]
    pub role_is_attached: bool,
    pub bucket_name: String,
    pub file_name: String,
    pub content: String,
}

pub async fn write_s3_object(
    State(state): State<AppState>,
    Query(query): Query<WriteObjectQuery>,
) -> Result<(StatusCode, Json<String>)> {
    let object = ObjectReference::new(query.bucket_name, query.file_name);
    let message =
        objects::write_object(&state.settings, query.role_is_attached, &object, &query.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
