use std::path::PathBuf;

use http::StatusCode;

/// Failures of a provisioning run
///
/// None of these are recovered from; the CLI reports the error and exits.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed target server config")]
    MalformedConfig(#[source] serde_json::Error),

    #[error("invalid target server config: {0}")]
    InvalidConfig(String),

    #[error("invalid scope {0:?}, expected organizations/{{org}}/environments/{{env}}")]
    InvalidScope(String),

    #[error("invalid API base URL {0:?}")]
    InvalidBaseUrl(String),

    #[error("service account authentication")]
    Auth(#[source] gcp_auth::Error),

    #[error("request to Apigee API")]
    Transport(#[source] reqwest::Error),

    #[error("Apigee API returned {status}: {body}")]
    RemoteCall { status: StatusCode, body: String },

    #[error("decode Apigee API response")]
    Decode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
