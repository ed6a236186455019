use std::path::Path;

use gcp_auth::{CustomServiceAccount, TokenProvider};
use tokio::fs;

use crate::error::{Error, Result};

/// OAuth2 scope required by the Apigee management API
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Credentials for a Google service account, loaded from its JSON key file
pub struct ServiceAccount {
    inner: CustomServiceAccount,
}

impl ServiceAccount {
    /// Reads the key file at `path`
    ///
    /// The file contents are passed to `gcp_auth` untouched.
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).await.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let inner = CustomServiceAccount::from_json(&String::from_utf8_lossy(bytes))
            .map_err(Error::Auth)?;

        Ok(Self { inner })
    }
}

/// A source of OAuth2 bearer tokens for API calls
pub trait AccessToken {
    async fn bearer_token(&self) -> Result<String>;
}

impl AccessToken for ServiceAccount {
    /// Exchanges the service account key for an access token
    async fn bearer_token(&self) -> Result<String> {
        let token = self
            .inner
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(Error::Auth)?;

        Ok(token.as_str().to_owned())
    }
}
