//! File upload, listing, download, and deletion handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use dropshare_core::error::AppError;
use dropshare_core::traits::storage::StoredObjectMeta;
use dropshare_service::file::service::UploadedFile;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/files/upload — multipart upload, field `file`
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadedFile>>, ApiError> {
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("").to_string();
        if name.is_empty() {
            return Err(AppError::validation("No selected file").into());
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

        file_name = Some(name);
        data = Some(bytes);
    }

    let (file_name, data) = match (file_name, data) {
        (Some(name), Some(data)) => (name, data),
        _ => return Err(AppError::validation("No file part").into()),
    };

    let uploaded = state.file_service.upload(&file_name, data).await?;

    Ok(Json(ApiResponse::ok(uploaded)))
}

/// GET /api/files — list stored files
pub async fn list_files(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StoredObjectMeta>>>, ApiError> {
    let files = state.file_service.list().await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/files/{name}/download — direct download
pub async fn download_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let result = state.file_service.download(&name).await?;
    attachment_response(result.content_type, result.file_name, result.data)
}

/// DELETE /api/files/{name}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.file_service.delete(&name).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("File {name} deleted"),
    })))
}

/// Builds an attachment download response from file content.
pub(crate) fn attachment_response(
    content_type: String,
    file_name: String,
    data: Bytes,
) -> Result<Response, ApiError> {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}
