//! S3 implementation of [`MultipartStore`]
//!
//! Works against AWS S3 or compatible services (MinIO, LocalStack) when a
//! custom endpoint is configured.

use async_trait::async_trait;
use aws_config::{retry::RetryConfig, BehaviorVersion};
use aws_sdk_s3::{
    config::Region,
    presigning::PresigningConfig,
    types::{CompletedMultipartUpload, CompletedPart, ServerSideEncryption},
    Client,
};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::{CompletedUpload, MultipartStore, PartDescriptor, StorageError, StorageResult};
use crate::config::StorageConfig;

/// S3 client bound to one bucket and encryption key
pub struct S3Store {
    client: Client,
    bucket: String,
    kms_key_id: Option<String>,
}

impl S3Store {
    /// Build the SDK client from the default credential chain.
    ///
    /// Gateway-level retries are disabled so provider failures reach the
    /// caller on the first attempt.
    pub async fn from_config(config: &StorageConfig) -> Self {
        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint,
            "Initializing S3 client"
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled());
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        if config.kms_key_id.is_none() {
            warn!("KMS_KEY_ID not set, uploads will use the bucket's default KMS key");
        }

        Self::with_client(Client::from_conf(s3_config), config)
    }

    pub fn with_client(client: Client, config: &StorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            kms_key_id: config.kms_key_id.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl MultipartStore for S3Store {
    async fn create_multipart_upload(&self, key: &str) -> StorageResult<String> {
        const OPERATION: &str = "CreateMultipartUpload";
        debug!(bucket = %self.bucket, key = %key, "Creating multipart upload");

        let mut request = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .server_side_encryption(ServerSideEncryption::AwsKms);
        if let Some(kms_key_id) = &self.kms_key_id {
            request = request.ssekms_key_id(kms_key_id);
        }

        let output = request.send().await.map_err(|e| {
            let err = StorageError::from_sdk(OPERATION, e);
            error!(key = %key, error = %err, "Failed to create multipart upload");
            err
        })?;

        let upload_id = output
            .upload_id()
            .ok_or(StorageError::MissingField {
                operation: OPERATION,
                field: "UploadId",
            })?
            .to_string();

        info!(key = %key, upload_id = %upload_id, "Multipart upload created");
        Ok(upload_id)
    }

    async fn presign_upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        expires_in: Duration,
    ) -> StorageResult<String> {
        const OPERATION: &str = "UploadPart";

        let presigning = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StorageError::Signing {
                operation: OPERATION,
                message: e.to_string(),
            }
        })?;

        let presigned = self
            .client
            .upload_part()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .part_number(part_number)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::from_sdk(OPERATION, e))?;

        debug!(
            key = %key,
            upload_id = %upload_id,
            part_number,
            expires_in_secs = expires_in.as_secs(),
            "Presigned part upload"
        );
        Ok(presigned.uri().to_string())
    }

    async fn complete_multipart_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: Vec<PartDescriptor>,
    ) -> StorageResult<CompletedUpload> {
        const OPERATION: &str = "CompleteMultipartUpload";
        let part_count = parts.len();

        let completed_parts: Vec<CompletedPart> = parts
            .into_iter()
            .map(|part| {
                CompletedPart::builder()
                    .part_number(part.part_number)
                    .e_tag(part.e_tag)
                    .build()
            })
            .collect();

        let output = self
            .client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed_parts))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| {
                let err = StorageError::from_sdk(OPERATION, e);
                error!(key = %key, upload_id = %upload_id, error = %err, "Failed to complete multipart upload");
                err
            })?;

        info!(key = %key, upload_id = %upload_id, part_count, "Multipart upload completed");

        Ok(CompletedUpload {
            location: output.location().map(str::to_string),
            bucket: output.bucket().map(str::to_string),
            key: output.key().map(str::to_string),
            e_tag: output.e_tag().map(str::to_string),
            version_id: output.version_id().map(str::to_string),
            server_side_encryption: output
                .server_side_encryption()
                .map(|sse| sse.as_str().to_string()),
            ssekms_key_id: output.ssekms_key_id().map(str::to_string),
            bucket_key_enabled: output.bucket_key_enabled(),
            checksum_crc32: output.checksum_crc32().map(str::to_string),
            checksum_crc32_c: output.checksum_crc32_c().map(str::to_string),
            checksum_sha1: output.checksum_sha1().map(str::to_string),
            checksum_sha256: output.checksum_sha256().map(str::to_string),
            expiration: output.expiration().map(str::to_string),
            request_charged: output
                .request_charged()
                .map(|charged| charged.as_str().to_string()),
        })
    }

    async fn health_check(&self) -> bool {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => true,
            Err(e) => {
                let err = StorageError::from_sdk("HeadBucket", e);
                warn!(bucket = %self.bucket, error = %err, "Bucket health check failed");
                false
            }
        }
    }
}
