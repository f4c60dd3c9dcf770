use mason::docker::DockerClient;
use mason::{Container, FileJar, MasonConfig};
use secrecy::SecretString;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Environment variable holding the registry password.
const PASSWORD_ENV: &str = "MASON_REGISTRY_PASSWORD";

/// Registry login options; unset fields fall back to mason.toml.
pub struct Credentials {
    pub username: Option<String>,
    pub registry: Option<String>,
    pub password_stdin: bool,
}

pub async fn login(jar_path: &Path, credentials: &Credentials) -> anyhow::Result<()> {
    let mut container = super::load_container(jar_path)?;
    let client = super::docker_client()?;

    let message = log_in(&mut container, &client, credentials).await?;
    println!("{message}");
    Ok(())
}

pub async fn push(jar_path: &Path, credentials: &Credentials, verbose: bool) -> anyhow::Result<()> {
    let mut container = super::load_container(jar_path)?;
    let client = super::docker_client()?;

    log_in(&mut container, &client, credentials).await?;
    let remote = container.remote_tag()?;
    let logs = container.push(&client, verbose).await?;
    for line in &logs {
        println!("{line}");
    }

    println!("Pushed {remote}");
    Ok(())
}

async fn log_in(
    container: &mut Container<FileJar>,
    client: &DockerClient,
    credentials: &Credentials,
) -> anyhow::Result<String> {
    let config = MasonConfig::load(&PathBuf::from("."))?;

    let username = credentials
        .username
        .clone()
        .or(config.registry.username)
        .ok_or_else(|| {
            anyhow::anyhow!("no registry username — pass --username or set [registry].username")
        })?;
    let registry = credentials
        .registry
        .clone()
        .unwrap_or(config.registry.default);
    let password = read_password(credentials.password_stdin)?;

    Ok(container
        .login(client, &username, &registry, &password)
        .await?)
}

fn read_password(from_stdin: bool) -> anyhow::Result<SecretString> {
    if from_stdin {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        return Ok(SecretString::from(line.trim_end_matches(['\r', '\n']).to_owned()));
    }

    std::env::var(PASSWORD_ENV)
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("{PASSWORD_ENV}: {e} — export it or pass --password-stdin"))
}
