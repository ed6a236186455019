use std::path::Path;

use tracing::info;

use crate::{
    apigee::{TargetServer, TargetServers},
    error::Result,
    scope::Scope,
    target_server::TargetServerConfig,
};

/// Registers the target server described in `target_server_file` under `scope`
///
/// The config file is read and validated before `api` is called, so a bad
/// file never results in a remote request.
pub async fn provision<A: TargetServers>(
    api: &A,
    scope: &Scope,
    target_server_file: &Path,
) -> Result<TargetServer> {
    info!(path = %target_server_file.display(), "loading target server config");
    let config = TargetServerConfig::load_from_path(target_server_file).await?;

    let request = TargetServer::from(&config);

    info!(%scope, name = %request.name, host = %request.host, port = request.port, "creating target server");
    let created = api.create(scope, &request).await?;
    info!(name = %created.name, "target server created");

    Ok(created)
}
