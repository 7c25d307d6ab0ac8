//! Invoice calls

use bytes::Bytes;
use reqwest::header;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RequestFailed, Result};
use crate::gateway::{Gateway, RequestBody, RequestDescriptor};

pub async fn create_invoice(gateway: &Gateway, invoice: impl Into<RequestBody>) -> Result<Value> {
    gateway
        .request(RequestDescriptor::post("/invoices").body(invoice))
        .await
}

pub async fn list_invoices(gateway: &Gateway) -> Result<Value> {
    gateway.request(RequestDescriptor::get("/invoices")).await
}

pub async fn get_invoice(gateway: &Gateway, invoice_id: &str) -> Result<Value> {
    gateway
        .request(RequestDescriptor::get(format!("/invoices/{}", invoice_id)))
        .await
}

pub async fn delete_invoice(gateway: &Gateway, invoice_id: &str) -> Result<Value> {
    gateway
        .request(RequestDescriptor::delete(format!("/invoices/{}", invoice_id)))
        .await
}

pub async fn update_invoice_status(gateway: &Gateway, invoice_id: &str, status: &str) -> Result<Value> {
    gateway
        .request(
            RequestDescriptor::put(format!("/invoices/{}/status", invoice_id))
                .body(json!({ "status": status })),
        )
        .await
}

/// Email an invoice. Without `client_email` the server uses the address on the invoice.
pub async fn send_invoice(
    gateway: &Gateway,
    invoice_id: &str,
    client_email: Option<&str>,
) -> Result<Value> {
    let mut payload = Map::new();
    if let Some(email) = client_email.filter(|e| !e.is_empty()) {
        payload.insert("client_email".to_string(), Value::String(email.to_string()));
    }
    gateway
        .request(
            RequestDescriptor::post(format!("/invoices/{}/send", invoice_id))
                .body(Value::Object(payload)),
        )
        .await
}

pub async fn invoice_statistics(gateway: &Gateway) -> Result<Value> {
    gateway
        .request(RequestDescriptor::get("/invoices/statistics"))
        .await
}

/// A rendered invoice document
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub file_name: String,
    pub bytes: Bytes,
}

impl PdfDocument {
    /// Write the document into `dir` under its file name
    pub fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Fetch the PDF rendering of an invoice. Requires a stored credential.
pub async fn download_invoice_pdf(gateway: &Gateway, invoice_id: &str) -> Result<PdfDocument> {
    let token = gateway
        .session()
        .credential()?
        .ok_or_else(|| RequestFailed::new("No authentication token found"))?;

    let endpoint = format!("/invoices/{}/pdf", invoice_id);
    tracing::debug!("GET {} (document)", endpoint);

    let response = gateway
        .http_client()
        .get(gateway.url(&endpoint))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("{} failed with {}", endpoint, status);
        return Err(RequestFailed::with_status("Failed to download PDF", status.as_u16()));
    }

    Ok(PdfDocument {
        file_name: format!("invoice_{}.pdf", invoice_id),
        bytes: response.bytes().await?,
    })
}
