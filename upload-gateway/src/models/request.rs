use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::storage::PartDescriptor;
use crate::utils::serialization;

/// Object keys longer than this many UTF-8 bytes are rejected by the provider.
pub const MAX_KEY_LENGTH: usize = 1024;

/// Valid part numbers for a multipart upload.
pub const MIN_PART_NUMBER: i32 = 1;
pub const MAX_PART_NUMBER: i32 = 10_000;

/// Start a multipart upload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InitiateUploadRequest {
    #[validate(custom = "validate_key")]
    pub key: String,
}

/// Authorize the upload of one part
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_presign_part", skip_on_field_errors = false))]
pub struct PresignPartRequest {
    #[validate(custom = "validate_key")]
    pub key: String,

    #[validate(length(min = 1, message = "Upload id is required"))]
    pub upload_id: String,

    #[serde(deserialize_with = "serialization::part_number")]
    pub part_number: i32,
}

/// Assemble uploaded parts into the final object
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteUploadRequest {
    #[validate(custom = "validate_key")]
    pub key: String,

    #[validate(length(min = 1, message = "Upload id is required"))]
    pub upload_id: String,

    #[validate(
        length(min = 1, message = "At least one part is required"),
        custom = "validate_parts"
    )]
    pub parts: Vec<CompletedPartRequest>,
}

/// One uploaded part. Also accepts the provider's `PartNumber` / `ETag`
/// spelling, which is what browsers read back from the part upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPartRequest {
    #[serde(alias = "PartNumber", deserialize_with = "serialization::part_number")]
    pub part_number: i32,

    #[serde(alias = "ETag")]
    pub e_tag: String,
}

impl From<CompletedPartRequest> for PartDescriptor {
    fn from(part: CompletedPartRequest) -> Self {
        PartDescriptor {
            part_number: part.part_number,
            e_tag: part.e_tag,
        }
    }
}

fn validate_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() || key.len() > MAX_KEY_LENGTH {
        let mut error = ValidationError::new("key_length");
        error.message = Some(format!("Key must be 1-{} bytes", MAX_KEY_LENGTH).into());
        return Err(error);
    }
    Ok(())
}

fn check_part_number(part_number: i32) -> Result<(), ValidationError> {
    if !(MIN_PART_NUMBER..=MAX_PART_NUMBER).contains(&part_number) {
        let mut error = ValidationError::new("part_number_range");
        error.message = Some(
            format!(
                "Part number {} must be between {} and {}",
                part_number, MIN_PART_NUMBER, MAX_PART_NUMBER
            )
            .into(),
        );
        return Err(error);
    }
    Ok(())
}

fn validate_presign_part(request: &PresignPartRequest) -> Result<(), ValidationError> {
    check_part_number(request.part_number)
}

fn validate_parts(parts: &[CompletedPartRequest]) -> Result<(), ValidationError> {
    for part in parts {
        check_part_number(part.part_number)?;
        if part.e_tag.trim().is_empty() {
            let mut error = ValidationError::new("e_tag_required");
            error.message = Some(format!("Part {} is missing its ETag", part.part_number).into());
            return Err(error);
        }
    }
    Ok(())
}
