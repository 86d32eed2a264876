// src/server/mod.rs
//! HTTP PDF render endpoint
//!
//! A stateless alternate path for the PDF format: entries and template
//! arrive in the request body, the response carries the rendered document
//! as a base64 data URI. The store is never consulted.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::entity::{ExportFormat, ExportTemplate, LogEntry};
use crate::error::Result;
use crate::export;

/// Wire shape of `POST /api/pdf`, camelCase like the rest of the JSON
/// surface.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfRequest {
    pub logs: Vec<LogEntry>,
    pub template: ExportTemplate,
    pub file_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfResponse {
    pub pdf_url: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/pdf", post(render_pdf))
        .route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn render_pdf(
    Json(req): Json<PdfRequest>,
) -> std::result::Result<Json<PdfResponse>, (StatusCode, Json<Value>)> {
    // This endpoint only renders PDF, whatever the template says.
    let mut template = req.template;
    template.format = ExportFormat::Pdf;

    match export::render(&req.logs, &template) {
        Ok(payload) => {
            info!(
                file_name = %req.file_name,
                logs = req.logs.len(),
                bytes = payload.len(),
                "rendered pdf"
            );
            Ok(Json(PdfResponse {
                pdf_url: format!(
                    "data:application/pdf;base64,{}",
                    BASE64.encode(payload.as_bytes())
                ),
            }))
        }
        Err(e) => {
            warn!(file_name = %req.file_name, "pdf render failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}

/// Serve the router until ctrl-c.
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ExportTemplate, LogEntry};

    #[tokio::test]
    async fn test_health_reports_ok() {
        let Json(body) = health().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_render_pdf_returns_data_uri() {
        let req = PdfRequest {
            logs: vec![LogEntry::new("테스트 일지".to_string())],
            template: ExportTemplate::new("PDF 기본".to_string(), ExportFormat::Pdf),
            file_name: "일지_2024-01-01".to_string(),
        };

        let Json(resp) = render_pdf(Json(req)).await.unwrap();
        assert!(resp.pdf_url.starts_with("data:application/pdf;base64,"));

        let encoded = resp.pdf_url.trim_start_matches("data:application/pdf;base64,");
        let bytes = BASE64.decode(encoded).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_render_pdf_ignores_template_format() {
        // A text template posted to the PDF endpoint still yields a PDF.
        let req = PdfRequest {
            logs: vec![],
            template: ExportTemplate::new("텍스트".to_string(), ExportFormat::Text),
            file_name: "문서".to_string(),
        };

        let Json(resp) = render_pdf(Json(req)).await.unwrap();
        assert!(resp.pdf_url.starts_with("data:application/pdf;base64,"));
    }

    #[test]
    fn test_request_wire_shape_is_camel_case() {
        let body = json!({
            "logs": [],
            "template": serde_json::to_value(ExportTemplate::new(
                "보고".to_string(),
                ExportFormat::Pdf,
            ))
            .unwrap(),
            "fileName": "일지",
        });

        let req: PdfRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.file_name, "일지");
    }
}
