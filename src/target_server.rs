use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Error, Result};

/// A backend endpoint to register, as read from the target server config file
///
/// Every key is required. Keys other than these four are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetServerConfig {
    pub name: String,
    pub host: String,
    pub port: u16,

    /// Whether the target server negotiates TLS with the backend
    #[serde(rename = "SSL", alias = "ssl")]
    pub tls_enabled: bool,
}

impl TargetServerConfig {
    /// Reads, parses and validates the config file at `path`
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).await.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_slice(&bytes)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(Error::MalformedConfig)
    }

    /// Rejects values that would only fail later at the remote API
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfig("name must not be empty".into()));
        }

        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("host must not be empty".into()));
        }

        if self.port == 0 {
            return Err(Error::InvalidConfig(
                "port must be between 1 and 65535".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let config = TargetServerConfig::from_slice(
            br#"{"name":"my-target","host":"www.example.com","port":443,"SSL":true}"#,
        )
        .unwrap();

        assert_eq!(
            config,
            TargetServerConfig {
                name: "my-target".to_string(),
                host: "www.example.com".to_string(),
                port: 443,
                tls_enabled: true,
            }
        );
    }

    #[test]
    fn ignore_unknown_keys() {
        let config = TargetServerConfig::from_slice(
            br#"{"name":"a","host":"b","port":80,"SSL":false,"description":"x"}"#,
        )
        .unwrap();

        assert_eq!(config.port, 80);
        assert!(!config.tls_enabled);
    }

    #[test]
    fn serialize_tls_flag_as_ssl_key() {
        let config = TargetServerConfig {
            name: "a".to_string(),
            host: "b".to_string(),
            port: 8443,
            tls_enabled: true,
        };

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["SSL"], serde_json::json!(true));

        let bytes = serde_json::to_vec(&config).unwrap();
        assert_eq!(TargetServerConfig::from_slice(&bytes).unwrap(), config);
    }

    #[test]
    fn accept_lowercase_ssl_key() {
        let config = TargetServerConfig::from_slice(
            br#"{"name":"a","host":"b","port":443,"ssl":true}"#,
        )
        .unwrap();
        assert!(config.tls_enabled);
    }

    #[test]
    fn reject_missing_key() {
        let error =
            TargetServerConfig::from_slice(br#"{"name":"a","host":"b","SSL":true}"#).unwrap_err();
        assert!(matches!(error, Error::MalformedConfig(_)));
    }

    #[test]
    fn reject_invalid_json() {
        let error = TargetServerConfig::from_slice(b"{name: a").unwrap_err();
        assert!(matches!(error, Error::MalformedConfig(_)));
    }

    #[test]
    fn reject_out_of_range_port() {
        let error = TargetServerConfig::from_slice(
            br#"{"name":"a","host":"b","port":70000,"SSL":true}"#,
        )
        .unwrap_err();
        assert!(matches!(error, Error::MalformedConfig(_)));
    }

    #[test]
    fn reject_empty_name() {
        let config = TargetServerConfig::from_slice(
            br#"{"name":"","host":"b","port":443,"SSL":true}"#,
        )
        .unwrap();

        let error = config.validate().unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid target server config: name must not be empty"
        );
    }

    #[test]
    fn reject_zero_port() {
        let config =
            TargetServerConfig::from_slice(br#"{"name":"a","host":"b","port":0,"SSL":true}"#)
                .unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn load_missing_file() {
        let path = Path::new("/nonexistent/target-server-config.json");
        let error = TargetServerConfig::load_from_path(path).await.unwrap_err();

        match error {
            Error::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_file() {
        let path = std::env::temp_dir().join(format!(
            "target-server-config-{}.json",
            std::process::id()
        ));
        tokio::fs::write(
            &path,
            r#"{"name":"t","host":"10.0.0.1","port":8080,"SSL":false}"#,
        )
        .await
        .unwrap();

        let config = TargetServerConfig::load_from_path(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(config.unwrap().host, "10.0.0.1");
    }
}
