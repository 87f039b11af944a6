//! Share creation, public shared download, and revocation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;

use crate::dto::response::{ApiResponse, MessageResponse, ShareLinkResponse};
use crate::error::ApiError;
use crate::handlers::file::attachment_response;
use crate::state::AppState;

/// POST /api/files/{name}/share — create a share link for a stored file
pub async fn create_share(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<ShareLinkResponse>>, ApiError> {
    let link = state.share_service.share(&name).await?;

    let url = format!("/api/s/{}", link.token);
    Ok(Json(ApiResponse::ok(ShareLinkResponse {
        token: link.token,
        url,
        file_name: link.file_id,
        expires_at: link.expires_at,
    })))
}

/// GET /api/s/{token} — download a file via a share link
pub async fn shared_download(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let file_name = state.share_service.resolve(&token).await?;

    // The underlying file may have been deleted after the link was issued;
    // that surfaces as a plain 404 from the file service.
    let result = state.file_service.download(&file_name).await?;
    attachment_response(result.content_type, result.file_name, result.data)
}

/// DELETE /api/s/{token} — revoke a share link (idempotent)
pub async fn revoke_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.share_service.revoke(&token).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Share link revoked".to_string(),
    })))
}
