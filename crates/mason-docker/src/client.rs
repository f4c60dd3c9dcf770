use crate::docker::DockerError;
use crate::executor::{DockerExecutor, RealExecutor};
use secrecy::{ExposeSecret, SecretString};
use std::path::Path;

/// Container engine operations, parameterized over the executor for testability.
pub struct DockerClient<E: DockerExecutor = RealExecutor> {
    executor: E,
}

impl DockerClient<RealExecutor> {
    pub fn new() -> Self {
        Self::with_executor(RealExecutor::new())
    }
}

impl Default for DockerClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DockerExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Images ──

    /// Build the image in `context_dir` and tag it `tag`.
    pub async fn build(&self, context_dir: &Path, tag: &str) -> Result<BuildOutput, BuildError> {
        let context = context_dir
            .to_str()
            .ok_or_else(|| BuildError::InvalidPath(context_dir.to_path_buf()))?;

        tracing::info!(tag, context, "building image");
        let output = self
            .executor
            .exec(&args(["build", "--progress", "plain", "--tag", tag, context]))
            .await
            .map_err(|e| BuildError::Build { source: e })?;

        let image_id = self
            .executor
            .exec(&args(["image", "inspect", "--format", "{{.Id}}", tag]))
            .await
            .map_err(|e| BuildError::Inspect { source: e })?
            .trim()
            .to_owned();

        Ok(BuildOutput {
            image_id,
            logs: output.lines().map(str::to_owned).collect(),
        })
    }

    /// Apply `target` as an additional tag of `source`.
    pub async fn tag(&self, source: &str, target: &str) -> Result<(), PushError> {
        self.executor
            .exec(&args(["tag", source, target]))
            .await
            .map_err(|e| PushError::Tag { source: e })?;
        Ok(())
    }

    // ── Containers ──

    /// Run `command` in a throwaway container of `tag` and return its stdout.
    pub async fn run(&self, tag: &str, command: &[String]) -> Result<String, RunError> {
        let mut argv = args(["run", "--rm", tag]);
        argv.extend(command.iter().cloned());

        tracing::info!(tag, ?command, "running container");
        self.executor
            .exec(&argv)
            .await
            .map_err(|e| RunError::Run { source: e })
    }

    // ── Registry ──

    /// Log in to `registry`; the password is passed on stdin.
    pub async fn login(
        &self,
        username: &str,
        registry: &str,
        password: &SecretString,
    ) -> Result<String, LoginError> {
        tracing::info!(username, registry, "logging in");
        let output = self
            .executor
            .exec_with_stdin(
                &args(["login", "--username", username, "--password-stdin", registry]),
                password.expose_secret().as_bytes(),
            )
            .await
            .map_err(|e| match e {
                DockerError::CommandFailed { stderr, .. } => LoginError::Rejected {
                    registry: registry.to_owned(),
                    detail: stderr.trim().to_owned(),
                },
                other => LoginError::Login { source: other },
            })?;

        Ok(output.trim().to_owned())
    }

    /// Push `tag`. With `verbose` the push progress streams to the terminal
    /// and no log lines are returned.
    pub async fn push(&self, tag: &str, verbose: bool) -> Result<Vec<String>, PushError> {
        tracing::info!(tag, "pushing image");
        let argv = args(["push", tag]);

        if verbose {
            self.executor
                .exec_streaming(&argv)
                .await
                .map_err(|e| PushError::Push { source: e })?;
            return Ok(Vec::new());
        }

        let output = self
            .executor
            .exec(&argv)
            .await
            .map_err(|e| PushError::Push { source: e })?;
        Ok(output.lines().map(str::to_owned).collect())
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

// ── Output / error types ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub image_id: String,
    pub logs: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("build context path is not valid UTF-8: {0}")]
    InvalidPath(std::path::PathBuf),

    #[error("image build failed")]
    Build { source: DockerError },

    #[error("failed to inspect built image")]
    Inspect { source: DockerError },
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("container run failed")]
    Run { source: DockerError },
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("registry {registry} rejected the credentials: {detail}")]
    Rejected { registry: String, detail: String },

    #[error("registry login failed")]
    Login { source: DockerError },
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("failed to tag image")]
    Tag { source: DockerError },

    #[error("image push failed")]
    Push { source: DockerError },
}
