use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;

/// Every way a key generation call can fail after normalization.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("failed to start key generator `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for key generator: {0}")]
    Wait(#[source] io::Error),

    #[error("key generator did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("key generator exited with {status}: {stderr}")]
    ToolFailed { status: ExitStatus, stderr: String },

    #[error("key generator output {} is missing: {source}", .path.display())]
    MissingOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status_code: u16,
}

/// JSON API failure. The cause is logged, the client only sees a generic body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("key generation failed")]
    Generation(#[from] GenerationError),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Generation(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
            status_code: status.code,
        };
        (status, Json(body)).respond_to(req)
    }
}
