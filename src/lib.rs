//! Rate-limited client for the product registry's document submission API.

pub mod document_service;
pub mod errors;
pub mod models;
pub mod rate_limiter;

pub use document_service::DocumentService;
pub use errors::ServiceError;
pub use models::{Description, Document, Product};
pub use rate_limiter::RateLimiter;
