use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Interrupted while waiting for an admission slot")]
    Interrupted,

    #[error("HTTP error {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Document submission failed after {attempts} attempts: [{}]", format_causes(.causes))]
    SubmissionFailed {
        attempts: usize,
        causes: Vec<ServiceError>,
    },

    #[error("Submission not found: {0}")]
    SubmissionNotFound(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Transport(err.to_string())
    }
}

fn format_causes(causes: &[ServiceError]) -> String {
    causes
        .iter()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
