//! Stateless HTTP gateway for S3 multipart uploads
//!
//! Clients start an upload, ask for one presigned `PUT` URL per part, send
//! the part bytes straight to the storage provider, and finally ask the
//! gateway to assemble the parts. All upload state lives at the provider.

use std::sync::Arc;

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod storage;
pub mod utils;

use config::AppConfig;
use storage::MultipartStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MultipartStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn MultipartStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
