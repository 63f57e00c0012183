//! Storage module for S3 multipart uploads
//!
//! Handlers depend on the [`MultipartStore`] trait; [`S3Store`] is the
//! production implementation backed by `aws-sdk-s3`.

pub mod error;
pub mod s3_client;

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

pub use error::{StorageError, StorageResult};
pub use s3_client::S3Store;

/// One uploaded part, as needed to assemble the final object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartDescriptor {
    pub part_number: i32,
    pub e_tag: String,
}

/// Result of a completed multipart upload, with the provider's field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompletedUpload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "ETag", skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<String>,
    #[serde(rename = "SSEKMSKeyId", skip_serializing_if = "Option::is_none")]
    pub ssekms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_key_enabled: Option<bool>,
    #[serde(rename = "ChecksumCRC32", skip_serializing_if = "Option::is_none")]
    pub checksum_crc32: Option<String>,
    #[serde(rename = "ChecksumCRC32C", skip_serializing_if = "Option::is_none")]
    pub checksum_crc32_c: Option<String>,
    #[serde(rename = "ChecksumSHA1", skip_serializing_if = "Option::is_none")]
    pub checksum_sha1: Option<String>,
    #[serde(rename = "ChecksumSHA256", skip_serializing_if = "Option::is_none")]
    pub checksum_sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_charged: Option<String>,
}

/// Multipart upload operations delegated to the storage provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MultipartStore: Send + Sync {
    /// Start a new server-side encrypted multipart upload and return its id.
    async fn create_multipart_upload(&self, key: &str) -> StorageResult<String>;

    /// Sign a `PUT` for one part without moving any payload through us.
    async fn presign_upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Assemble `parts`, in the given order, into the final object.
    async fn complete_multipart_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: Vec<PartDescriptor>,
    ) -> StorageResult<CompletedUpload>;

    /// Whether the configured bucket is reachable with our credentials.
    async fn health_check(&self) -> bool;
}
