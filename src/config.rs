use std::{
    env,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::{fs::File, io::AsyncReadExt};

use crate::apigee::DEFAULT_BASE_URL;

/// Settings shared across runs, read from the user's config directory
#[derive(Debug, PartialEq)]
pub struct Config {
    pub credentials_file: PathBuf,
    pub target_server_file: PathBuf,
    pub organization: Option<String>,
    pub environment: Option<String>,
    pub api_base_url: String,
}

const CREDENTIALS_FILE: &str = "admapi.json";
const TARGET_SERVER_FILE: &str = "target-server-config.json";

impl Default for Config {
    fn default() -> Self {
        Config {
            credentials_file: PathBuf::from(CREDENTIALS_FILE),
            target_server_file: PathBuf::from(TARGET_SERVER_FILE),
            organization: None,
            environment: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads `apigee-targetserver/config.json` from the config home, falling
    /// back to defaults when it does not exist
    pub async fn load() -> Result<Self> {
        let path = get_config_home()?
            .join("apigee-targetserver")
            .join("config.json");

        match File::open(path).await {
            Ok(mut file) => Self::load_from_file(&mut file).await,
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err).context("open config file"),
        }
    }

    pub async fn load_from_path(path: &Path) -> Result<Self> {
        let mut file = File::open(path).await.context("open config file")?;
        Self::load_from_file(&mut file).await
    }

    async fn load_from_file(file: &mut File) -> Result<Self> {
        let mut dest = Vec::new();
        file.read_to_end(&mut dest).await?;

        let config_file: ConfigFile = serde_json::from_slice(&dest).context("parse config file")?;
        let defaults = Self::default();

        Ok(Config {
            credentials_file: config_file
                .credentials_file
                .unwrap_or(defaults.credentials_file),

            target_server_file: config_file
                .target_server_file
                .unwrap_or(defaults.target_server_file),

            organization: config_file.organization,
            environment: config_file.environment,

            api_base_url: config_file
                .api_base_url
                .unwrap_or(defaults.api_base_url),
        })
    }
}

fn get_config_home() -> Result<PathBuf> {
    match env::var("XDG_CONFIG_HOME") {
        Ok(path) => Ok(Path::new(&path).to_path_buf()),
        Err(_) => Ok(homedir::my_home()?.context("home dir")?.join(".config")),
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    credentials_file: Option<PathBuf>,
    target_server_file: Option<PathBuf>,
    organization: Option<String>,
    environment: Option<String>,
    api_base_url: Option<String>,
}
