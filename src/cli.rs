use std::{path::PathBuf, process::ExitCode};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use url::Url;

use crate::{
    apigee::ApigeeClient, auth::ServiceAccount, config::Config, logging, provision::provision,
    scope::Scope,
};

/// Create an Apigee target server from a JSON description
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct CLI {
    /// Service account key file
    #[arg(long, value_name = "PATH")]
    credentials: Option<PathBuf>,

    /// Target server description, e.g. {"name":..,"host":..,"port":..,"SSL":..}
    #[arg(long, value_name = "PATH")]
    target_server: Option<PathBuf>,

    #[arg(long, conflicts_with = "scope")]
    organization: Option<String>,

    #[arg(long, conflicts_with = "scope")]
    environment: Option<String>,

    /// Full scope, e.g. organizations/acme/environments/dev
    #[arg(long)]
    scope: Option<String>,

    /// Apigee API base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Config file to use instead of the one in the config home
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Everything a run needs, after merging the config file and flags
#[derive(Debug, PartialEq)]
pub struct Settings {
    pub credentials_file: PathBuf,
    pub target_server_file: PathBuf,
    pub scope: Scope,
    pub api_base_url: Url,
}

impl Settings {
    /// Flags take precedence over the config file
    pub fn resolve(cli: &CLI, config: Config) -> Result<Self> {
        let scope = match &cli.scope {
            Some(scope) => scope.parse::<Scope>()?,
            None => {
                let organization = cli.organization.clone().or(config.organization);
                let environment = cli.environment.clone().or(config.environment);

                match (organization, environment) {
                    (Some(org), Some(env)) => Scope::new(&org, &env)?,
                    (None, _) => bail!("organization is required (--organization or --scope)"),
                    (_, None) => bail!("environment is required (--environment or --scope)"),
                }
            }
        };

        let api_base_url = cli
            .api_url
            .as_deref()
            .unwrap_or(&config.api_base_url)
            .parse::<Url>()
            .context("parse API base URL")?;

        Ok(Self {
            credentials_file: cli.credentials.clone().unwrap_or(config.credentials_file),
            target_server_file: cli
                .target_server
                .clone()
                .unwrap_or(config.target_server_file),
            scope,
            api_base_url,
        })
    }
}

pub async fn run() -> ExitCode {
    let cli = CLI::parse();
    logging::init(cli.verbose);

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

/// Logs the full cause chain of a fatal error
fn fail(err: &anyhow::Error) -> ExitCode {
    error!("{:#}", err);
    ExitCode::FAILURE
}

async fn execute(cli: &CLI) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::load().await?,
    };

    let settings = Settings::resolve(cli, config)?;

    info!(path = %settings.credentials_file.display(), "loading service account");
    let credentials = ServiceAccount::load_from_path(&settings.credentials_file)
        .await
        .context("load service account credentials")?;

    let client = ApigeeClient::new(settings.api_base_url, credentials);
    let created = provision(&client, &settings.scope, &settings.target_server_file)
        .await
        .context("create target server")?;

    let output = serde_json::to_string_pretty(&created).context("serialize target server")?;
    println!("{}", output);

    Ok(())
}
