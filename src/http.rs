//! HTTP surface: router, handlers, and error-to-response mapping.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::InventoryError,
    model::{InventoryItem, ItemPatch, PhotoUpload},
    search::{match_items, SearchOutcome},
    store::InventoryStore,
};

/// Largest accepted request body; covers photo uploads.
const MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Shared handler state.
pub type AppState = Arc<InventoryStore>;

/// Builds the inventory API router over the given store.
pub fn build_router(store: AppState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/inventory", get(list_items))
        .route("/inventory/:id", get(get_item).put(update_item).delete(delete_item))
        .route("/inventory/:id/photo", get(get_photo).put(replace_photo))
        .route("/search", post(search))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(store)
}

/// Error wrapper mapping [`InventoryError`] onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub InventoryError);

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        Self(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self(InventoryError::validation(format!(
            "invalid multipart request: {err}"
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            InventoryError::Validation { .. } => StatusCode::BAD_REQUEST,
            InventoryError::ItemNotFound { .. }
            | InventoryError::PhotoNotBound { .. }
            | InventoryError::PhotoFileMissing { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "inventory operation failed");
        }
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ErrorBody {
    fn new(error: String) -> Self {
        Self { error }
    }
}

/// Confirmation body returned by delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    /// Human-readable confirmation message.
    pub message: String,
    /// Id of the removed item.
    pub id: String,
}

/// Request body accepted by the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Substring to match against names and descriptions.
    pub query: Option<String>,
}

#[derive(Debug, Default)]
struct UploadForm {
    name: Option<String>,
    description: Option<String>,
    photo: Option<PhotoUpload>,
}

async fn collect_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => form.name = Some(field.text().await?),
            Some("description") => form.description = Some(field.text().await?),
            Some("photo") => {
                // A file input left empty arrives with a blank filename.
                let original = field.file_name().map(str::to_owned);
                if original.as_deref().is_some_and(|name| !name.is_empty()) {
                    let content = field.bytes().await?;
                    form.photo = Some(PhotoUpload::new(original, content));
                }
            }
            _ => {}
        }
    }
    Ok(form)
}

async fn register(
    State(store): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    let form = collect_form(multipart).await?;
    let name = form.name.unwrap_or_default();
    let description = form.description.unwrap_or_default();
    let item = store.create(&name, &description, form.photo).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn list_items(State(store): State<AppState>) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    Ok(Json(store.list().await?))
}

async fn get_item(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InventoryItem>, ApiError> {
    Ok(Json(store.get(&id).await?))
}

async fn update_item(
    State(store): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<InventoryItem>, ApiError> {
    Ok(Json(store.update(&id, patch).await?))
}

async fn delete_item(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, ApiError> {
    let id = store.delete(&id).await?;
    Ok(Json(DeleteConfirmation {
        message: "Deleted".to_owned(),
        id,
    }))
}

async fn get_photo(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let (content, content_type) = store.read_photo(&id).await?;
    Ok(([(header::CONTENT_TYPE, content_type.to_string())], content).into_response())
}

async fn replace_photo(
    State(store): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<InventoryItem>, ApiError> {
    let form = collect_form(multipart).await?;
    Ok(Json(store.replace_photo(&id, form.photo).await?))
}

async fn search(
    State(store): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Html<String>, ApiError> {
    let items = store.list().await?;
    let body = match match_items(&items, request.query.as_deref()) {
        SearchOutcome::NoQuery => "No query provided".to_owned(),
        SearchOutcome::NoMatches => "Item not found".to_owned(),
        SearchOutcome::Matches(results) => render_results(&results),
    };
    Ok(Html(body))
}

fn render_results(results: &[InventoryItem]) -> String {
    let mut html = String::from("<h1>Search Results</h1>");
    for item in results {
        html.push_str(&format!(
            "<p><b>{}</b> — {}</p>",
            escape_html(&item.name),
            escape_html(&item.description)
        ));
        if let Some(url) = &item.photo_url {
            html.push_str(&format!("<img src=\"{url}\" width=\"150\"><br>"));
        }
    }
    html
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

async fn fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Not found".to_owned())),
    )
        .into_response()
}
