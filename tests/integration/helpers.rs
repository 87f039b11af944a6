//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use bytes::Bytes;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use dropshare_api::router::build_router;
use dropshare_api::state::AppState;
use dropshare_core::config::AppConfig;
use dropshare_core::traits::storage::FileStore;
use dropshare_service::file::FileService;
use dropshare_service::share::{ShareLinkManager, ShareService};
use dropshare_storage::LocalFileStore;

/// Multipart boundary used by the upload helper.
const BOUNDARY: &str = "X-DROPSHARE-TEST-BOUNDARY";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Upload directory, kept alive for the duration of the test
    _upload_dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application with a custom upload size limit
    pub async fn with_max_upload(max_upload_size_bytes: u64) -> Self {
        let mut config = AppConfig::default();
        config.storage.max_upload_size_bytes = max_upload_size_bytes;
        Self::with_config(config).await
    }

    async fn with_config(mut config: AppConfig) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        config.storage.upload_root = upload_dir.path().to_string_lossy().to_string();

        let store: Arc<dyn FileStore> = Arc::new(
            LocalFileStore::new(&config.storage.upload_root)
                .await
                .expect("Failed to init file store"),
        );

        let manager = Arc::new(ShareLinkManager::new(config.share.link_ttl_days));
        let file_service = Arc::new(FileService::new(Arc::clone(&store), config.storage.clone()));
        let share_service = Arc::new(ShareService::new(manager, store));

        let app_state = AppState {
            config: Arc::new(config),
            file_service,
            share_service,
        };

        let router = build_router(app_state);

        Self {
            router,
            _upload_dir: upload_dir,
        }
    }

    /// Make an HTTP request with an empty body
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a file through the multipart endpoint
    pub async fn upload(&self, file_name: &str, contents: &[u8]) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build upload request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub bytes: Bytes,
    /// Parsed JSON body (Null for non-JSON responses)
    pub body: Value,
}

impl TestResponse {
    /// The `data` object of a successful JSON response
    pub fn data(&self) -> &Value {
        assert_eq!(self.body["success"], Value::Bool(true), "body: {:?}", self.body);
        &self.body["data"]
    }
}
