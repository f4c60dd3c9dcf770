mod build;
mod inspect;
mod registry;
mod render;
mod run;
mod save;

use mason::docker::{DockerClient, RealExecutor};
use mason::{Container, FileJar, MasonConfig};
use std::path::{Path, PathBuf};

pub use build::build;
pub use inspect::inspect;
pub use registry::{Credentials, login, push};
pub use render::render;
pub use run::run;
pub use save::save;

/// Load mason.toml from the working directory and declare the jar.
pub(crate) fn load_container(jar_path: &Path) -> anyhow::Result<Container<FileJar>> {
    let config = MasonConfig::load(&PathBuf::from("."))?;
    let jar = FileJar::load(jar_path)?;
    Ok(Container::new(jar, &config)?)
}

/// Docker client for the daemon selected in mason.toml.
pub(crate) fn docker_client() -> anyhow::Result<DockerClient> {
    let config = MasonConfig::load(&PathBuf::from("."))?;
    let executor = match (config.docker.host, config.docker.context) {
        (Some(_), Some(_)) => anyhow::bail!("[docker] sets both host and context; keep one"),
        (Some(host), None) => RealExecutor::with_host(host),
        (None, Some(context)) => RealExecutor::with_context(context),
        (None, None) => RealExecutor::new(),
    };
    Ok(DockerClient::with_executor(executor))
}
