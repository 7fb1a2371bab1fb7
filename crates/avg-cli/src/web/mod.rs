//! HTTP upload service: `POST /scan` with a multipart `malware` field.

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use malice_avg::{presenter, ScanError, Scanner};
use multer::{Constraints, Multipart, SizeLimit};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

/// Multipart field carrying the sample.
pub const UPLOAD_FIELD: &str = "malware";

/// Largest accepted sample (32 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 32 << 20;

/// Room for boundaries, headers and other fields on top of the sample.
const FORM_OVERHEAD_BYTES: u64 = 1 << 20;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

#[derive(Clone)]
pub struct AppState {
    scanner: Arc<Scanner>,
    upload_dir: Arc<PathBuf>,
    max_upload: u64,
}

impl AppState {
    pub fn new(scanner: Arc<Scanner>, upload_dir: PathBuf) -> Self {
        Self {
            scanner,
            upload_dir: Arc::new(upload_dir),
            max_upload: MAX_UPLOAD_BYTES,
        }
    }

    /// Cap the size of an uploaded sample.
    #[must_use]
    pub const fn max_upload(mut self, bytes: u64) -> Self {
        self.max_upload = bytes;
        self
    }

    fn constraints(&self) -> Constraints {
        Constraints::new().size_limit(
            SizeLimit::new()
                .per_field(self.max_upload)
                .whole_stream(self.max_upload + FORM_OVERHEAD_BYTES),
        )
    }
}

#[derive(Debug, Error)]
enum WebError {
    #[error("Please supply a valid file to scan.")]
    Upload,

    #[error("Sample exceeds the {0} byte upload limit.")]
    TooLarge(u64),

    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("failed to encode result: {0}")]
    Json(#[from] serde_json::Error),
}

impl WebError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Upload | Self::TooLarge(_) => StatusCode::BAD_REQUEST,
            Self::Io(_) | Self::Scan(_) | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn is_client_error(&self) -> bool {
        matches!(self, Self::Upload | Self::TooLarge(_))
    }
}

impl From<multer::Error> for WebError {
    fn from(err: multer::Error) -> Self {
        match err {
            multer::Error::FieldSizeExceeded { limit, .. }
            | multer::Error::StreamSizeExceeded { limit } => Self::TooLarge(limit),
            _ => Self::Upload,
        }
    }
}

/// Serve scans on `addr` until the process is stopped.
pub async fn serve(addr: SocketAddr, scanner: Arc<Scanner>, upload_dir: PathBuf) -> anyhow::Result<()> {
    let state = AppState::new(scanner, upload_dir);

    let make_svc = make_service_fn(move |_conn| {
        let state = state.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let state = state.clone();
                async move { handle(req, state).await }
            }))
        }
    });

    info!(%addr, "AVG web service listening");
    Server::bind(&addr).serve(make_svc).await?;
    Ok(())
}

pub async fn handle(req: Request<Body>, state: AppState) -> Result<Response<Body>, Infallible> {
    match (req.method(), req.uri().path()) {
        (&Method::POST, "/scan" | "/scan/") => match scan_upload(req, &state).await {
            Ok(json) => Ok(respond(StatusCode::OK, JSON_CONTENT_TYPE, json)),
            Err(err) => {
                if err.is_client_error() {
                    warn!(error = %err, "rejected upload");
                } else {
                    error!(error = %err, "scan request failed");
                }
                Ok(respond(err.status(), TEXT_CONTENT_TYPE, err.to_string()))
            }
        },

        _ => Ok(respond(StatusCode::NOT_FOUND, TEXT_CONTENT_TYPE, "Not found")),
    }
}

async fn scan_upload(req: Request<Body>, state: &AppState) -> Result<String, WebError> {
    let boundary = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| multer::parse_boundary(value).ok())
        .ok_or(WebError::Upload)?;

    let mut multipart = Multipart::with_constraints(req.into_body(), boundary, state.constraints());
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        // Removed when dropped
        let tmp = tempfile::Builder::new()
            .prefix("web_")
            .tempfile_in(state.upload_dir.as_path())?;
        let mut file = tokio::fs::File::from_std(tmp.reopen()?);
        let mut size = 0;
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len();
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        drop(file);
        info!(path = %tmp.path().display(), size, "scanning upload");

        let result = state.scanner.scan(tmp.path()).await?;
        return Ok(presenter::to_json(&result)?);
    }

    Err(WebError::Upload)
}

fn respond(status: StatusCode, content_type: &'static str, body: impl Into<Body>) -> Response<Body> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::EicarRunner;
    use malice_avg::ScannerConfig;

    const BOUNDARY: &str = "malice-boundary";

    fn state(dir: &tempfile::TempDir) -> AppState {
        let scanner = Scanner::with_runner(ScannerConfig::new(), Arc::new(EicarRunner));
        AppState::new(Arc::new(scanner), dir.path().to_path_buf())
    }

    fn multipart(field: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"EICAR\"\r\n\
             Content-Type: application/octet-stream\r\n\
             \r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::builder()
            .method(Method::POST)
            .uri("/scan")
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(response: Response<Body>) -> String {
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn upload_dir_is_empty(dir: &tempfile::TempDir) -> bool {
        std::fs::read_dir(dir.path()).unwrap().count() == 0
    }

    #[tokio::test]
    async fn test_scan_upload() {
        let dir = tempfile::tempdir().unwrap();
        let response = handle(multipart("malware", "X5O!P%@AP"), state(&dir)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["avg"]["infected"], true);
        assert_eq!(json["avg"]["result"], "Virus identified EICAR_Test");
        assert_eq!(json["avg"]["engine"], "13.0.3118");
        assert!(json["avg"].get("markdown").is_none());

        assert!(upload_dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_oversized_upload_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let sample = "X".repeat(64);
        let response = handle(multipart("malware", &sample), state(&dir).max_upload(16))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("upload limit"));
        assert!(upload_dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_upload_within_limit() {
        let dir = tempfile::tempdir().unwrap();
        let response = handle(multipart("malware", "X5O!P%@AP"), state(&dir).max_upload(64))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let response = handle(multipart("sample", "X5O!P%@AP"), state(&dir)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Please supply a valid file to scan.");
    }

    #[tokio::test]
    async fn test_non_multipart_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/scan")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = handle(req, state(&dir)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let dir = tempfile::tempdir().unwrap();
        let req = Request::builder()
            .method(Method::GET)
            .uri("/scan")
            .body(Body::empty())
            .unwrap();

        let response = handle(req, state(&dir)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
