use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::{
    auth::AccessToken,
    error::{Error, Result},
    scope::Scope,
    target_server::TargetServerConfig,
};

pub const DEFAULT_BASE_URL: &str = "https://apigee.googleapis.com";

/// Protocol every target server is created with
pub const PROTOCOL_HTTP: &str = "HTTP";

/// An Apigee v1 TargetServer resource
///
/// Used both as the create request body and as the decoded response, which
/// may carry server-assigned values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetServer {
    pub name: String,
    pub host: String,
    pub port: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default)]
    pub is_enabled: bool,

    #[serde(rename = "sSLInfo", default, skip_serializing_if = "Option::is_none")]
    pub ssl_info: Option<TlsInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fields not modelled here, kept so the response prints in full
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TlsInfo {
    #[serde(default)]
    pub enabled: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TlsInfo {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            extra: Map::new(),
        }
    }
}

impl From<&TargetServerConfig> for TargetServer {
    fn from(config: &TargetServerConfig) -> Self {
        Self {
            name: config.name.clone(),
            host: config.host.clone(),
            port: i64::from(config.port),
            protocol: Some(PROTOCOL_HTTP.to_string()),
            is_enabled: true,
            ssl_info: Some(TlsInfo::enabled(config.tls_enabled)),
            description: None,
            extra: Map::new(),
        }
    }
}

/// The one remote operation a provisioning run needs
pub trait TargetServers {
    /// Creates `target_server` under `scope` and returns the stored resource
    async fn create(&self, scope: &Scope, target_server: &TargetServer) -> Result<TargetServer>;
}

/// Client for the Apigee management API
///
/// A bearer token is requested from `credentials` for each call.
pub struct ApigeeClient<T> {
    http: reqwest::Client,
    base_url: Url,
    credentials: T,
}

impl<T: AccessToken> ApigeeClient<T> {
    pub fn new(base_url: Url, credentials: T) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            credentials,
        }
    }

    /// Appends the collection path to the base URL, keeping any path prefix
    fn target_servers_url(&self, scope: &Scope) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend([
                "v1",
                "organizations",
                scope.organization.as_str(),
                "environments",
                scope.environment.as_str(),
                "targetservers",
            ]);

        Ok(url)
    }
}

impl<T: AccessToken> TargetServers for ApigeeClient<T> {
    async fn create(&self, scope: &Scope, target_server: &TargetServer) -> Result<TargetServer> {
        let url = self.target_servers_url(scope)?;
        let token = self.credentials.bearer_token().await?;
        debug!(%url, name = %target_server.name, "POST target server");

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(target_server)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::RemoteCall { status, body });
        }

        serde_json::from_str(&body).map_err(Error::Decode)
    }
}
