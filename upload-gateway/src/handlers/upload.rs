//! Multipart upload endpoints
//!
//! Each handler validates its body and makes exactly one provider call. Part
//! payloads never pass through here; clients `PUT` them to presigned URLs.

use axum::{extract::State, Json};
use std::time::Duration;
use tracing::info;

use crate::models::{
    ApiResult, CompleteUploadRequest, InitiateUploadRequest, InitiateUploadResponse,
    PresignPartRequest, PresignPartResponse,
};
use crate::storage::{CompletedUpload, PartDescriptor};
use crate::utils::ValidatedJson;
use crate::AppState;

/// Start a multipart upload for `key`
///
/// POST /initiate
pub async fn initiate_upload(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<InitiateUploadRequest>,
) -> ApiResult<Json<InitiateUploadResponse>> {
    info!(key = %req.key, "Initiating multipart upload");

    let upload_id = state.store.create_multipart_upload(&req.key).await?;

    Ok(Json(InitiateUploadResponse { upload_id }))
}

/// Issue a time-limited URL for uploading one part
///
/// POST /presign
pub async fn presign_part(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PresignPartRequest>,
) -> ApiResult<Json<PresignPartResponse>> {
    let expires_in = Duration::from_secs(state.config.storage.presign_expiry_secs);

    let url = state
        .store
        .presign_upload_part(&req.key, &req.upload_id, req.part_number, expires_in)
        .await?;

    Ok(Json(PresignPartResponse { url }))
}

/// Assemble the uploaded parts, in the order given, into the final object
///
/// POST /complete
pub async fn complete_upload(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CompleteUploadRequest>,
) -> ApiResult<Json<CompletedUpload>> {
    info!(
        key = %req.key,
        upload_id = %req.upload_id,
        part_count = req.parts.len(),
        "Completing multipart upload"
    );

    let parts: Vec<PartDescriptor> = req.parts.into_iter().map(PartDescriptor::from).collect();
    let completed = state
        .store
        .complete_multipart_upload(&req.key, &req.upload_id, parts)
        .await?;

    Ok(Json(completed))
}
