pub mod error;
pub mod request;
pub mod response;

pub use error::{ApiError, ApiResult};
pub use request::{
    CompleteUploadRequest, CompletedPartRequest, InitiateUploadRequest, PresignPartRequest,
};
pub use response::{InitiateUploadResponse, PresignPartResponse};
