use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use shared::bridge::BackendKind;
use tracing::{info, warn};
use uuid::Uuid;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Which part of the surface a request hit. Proxied families name the
/// backend they depend on so a 5xx can be attributed without reading the
/// handler log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteFamily {
    Health,
    Chat,
    Catalog,
    Memory,
    Automation,
    FileManagement,
    GeminiChat,
    Other,
}

impl RouteFamily {
    fn classify(path: &str) -> Self {
        let Some(api_path) = path.strip_prefix("/api/") else {
            return match path {
                "/healthz" | "/readyz" => Self::Health,
                _ => Self::Other,
            };
        };
        let head = api_path.split('/').next().unwrap_or_default();
        match head {
            "ai-chat" => Self::Chat,
            "connections" | "knowledge" | "personas" => Self::Catalog,
            "memory" => Self::Memory,
            "automation" => Self::Automation,
            "file-management" => Self::FileManagement,
            "gemini-chat" => Self::GeminiChat,
            _ => Self::Other,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Chat => "chat",
            Self::Catalog => "catalog",
            Self::Memory => "memory",
            Self::Automation => "automation",
            Self::FileManagement => "file_management",
            Self::GeminiChat => "gemini_chat",
            Self::Other => "other",
        }
    }

    const fn backend(self) -> Option<BackendKind> {
        match self {
            Self::Automation => Some(BackendKind::Automation),
            Self::FileManagement => Some(BackendKind::FileManagement),
            Self::GeminiChat => Some(BackendKind::GeminiCli),
            _ => None,
        }
    }
}

pub(super) async fn request_observability_middleware(req: Request, next: Next) -> Response {
    let request_id = caller_request_id(&req).unwrap_or_else(Uuid::new_v4);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let family = RouteFamily::classify(&path);
    let backend = family.backend().map_or("none", BackendKind::as_str);
    let started_at = Instant::now();

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status().as_u16();
    let latency_ms = started_at.elapsed().as_millis() as u64;
    if status >= 500 {
        warn!(
            %request_id, %method, %path, family = family.as_str(), backend, status, latency_ms,
            "assistant request failed"
        );
    } else {
        info!(
            %request_id, %method, %path, family = family.as_str(), backend, status, latency_ms,
            "assistant request served"
        );
    }

    response
}

/// Callers may correlate with their own id, but only a well-formed UUID is
/// echoed back.
fn caller_request_id(req: &Request) -> Option<Uuid> {
    let raw = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    Uuid::parse_str(raw.trim()).ok()
}
