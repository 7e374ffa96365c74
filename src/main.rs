use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use registry_document_service::document_service::DocumentService;
use registry_document_service::models::{Description, Document, Product};
use registry_document_service::rate_limiter::RateLimiter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting registry document submission service...");

    let request_limit: u32 = std::env::var("REQUEST_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let window_ms: u64 = std::env::var("RATE_WINDOW_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);

    let rate_limiter = Arc::new(RateLimiter::new(
        Duration::from_millis(window_ms),
        request_limit,
    )?);
    info!(
        "Rate limit: {} requests per {}ms window",
        rate_limiter.capacity(),
        window_ms
    );

    let service = DocumentService::new(rate_limiter)?;

    let signature =
        std::env::var("REGISTRY_SIGNATURE").unwrap_or_else(|_| "demo-signature".to_string());
    let document = sample_document();

    match service.submit_document(&document, &signature).await {
        Ok(response) => {
            info!("Submission accepted: {}", serde_json::to_string(&response)?);
        }
        Err(e) => {
            error!("Submission failed: {}", e);
        }
    }

    Ok(())
}

fn sample_document() -> Document {
    Document {
        description: Some(Description {
            participant_inn: Some("1234567890".to_string()),
        }),
        doc_id: Some("demo-doc-1".to_string()),
        doc_status: Some("DRAFT".to_string()),
        doc_type: Some("LP_INTRODUCE_GOODS".to_string()),
        owner_inn: Some("1234567890".to_string()),
        participant_inn: Some("1234567890".to_string()),
        producer_inn: Some("1234567890".to_string()),
        production_date: Some("2026-01-23".to_string()),
        production_type: Some("OWN_PRODUCTION".to_string()),
        products: vec![Product {
            owner_inn: Some("1234567890".to_string()),
            producer_inn: Some("1234567890".to_string()),
            production_date: Some("2026-01-23".to_string()),
            tnved_code: Some("6403".to_string()),
            uit_code: Some("010463003407002921gbcKQsAp".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}
