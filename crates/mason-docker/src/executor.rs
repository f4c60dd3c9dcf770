use crate::docker::DockerError;

/// Abstraction over docker CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait DockerExecutor: Send + Sync {
    /// Execute a docker command and capture stdout.
    async fn exec(&self, args: &[String]) -> Result<String, DockerError>;

    /// Execute a docker command, streaming output to the terminal.
    async fn exec_streaming(&self, args: &[String]) -> Result<(), DockerError>;

    /// Execute a docker command with data piped to stdin.
    async fn exec_with_stdin(
        &self,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<String, DockerError>;
}

/// Daemon a [`RealExecutor`] talks to, given as a global docker flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `--host <socket>`
    Host(String),
    /// `--context <name>`
    Context(String),
}

/// Real docker CLI executor.
///
/// Commands run with BuildKit enabled, which `build --progress` requires on
/// engines that still default to the legacy builder.
#[derive(Debug, Clone, Default)]
pub struct RealExecutor {
    endpoint: Option<Endpoint>,
}

impl RealExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target the daemon at `host` instead of the CLI default.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            endpoint: Some(Endpoint::Host(host.into())),
        }
    }

    /// Target the daemon of a named docker context.
    pub fn with_context(context: impl Into<String>) -> Self {
        Self {
            endpoint: Some(Endpoint::Context(context.into())),
        }
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Full docker argv: global endpoint flags must precede the subcommand.
    fn argv(&self, args: &[String]) -> Vec<String> {
        let mut argv = Vec::with_capacity(args.len() + 2);
        match &self.endpoint {
            Some(Endpoint::Host(host)) => argv.extend(["--host".to_owned(), host.clone()]),
            Some(Endpoint::Context(context)) => {
                argv.extend(["--context".to_owned(), context.clone()]);
            }
            None => {}
        }
        argv.extend_from_slice(args);
        argv
    }

    fn command(&self, args: &[String]) -> tokio::process::Command {
        let mut command = tokio::process::Command::new("docker");
        command.args(self.argv(args)).env("DOCKER_BUILDKIT", "1");
        command
    }

    fn finish(args: &[String], output: std::process::Output) -> Result<String, DockerError> {
        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| DockerError::InvalidUtf8 { source: e })
        } else {
            Err(DockerError::CommandFailed {
                args: args.to_vec(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}

impl DockerExecutor for RealExecutor {
    async fn exec(&self, args: &[String]) -> Result<String, DockerError> {
        use std::process::Stdio;

        tracing::debug!(?args, endpoint = ?self.endpoint, "docker");
        let output = self
            .command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| DockerError::NotFound { source: e })?;

        Self::finish(args, output)
    }

    async fn exec_streaming(&self, args: &[String]) -> Result<(), DockerError> {
        use std::process::Stdio;

        tracing::debug!(?args, "docker (streaming)");
        let status = self
            .command(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| DockerError::NotFound { source: e })?;

        if status.success() {
            Ok(())
        } else {
            Err(DockerError::CommandFailed {
                args: args.to_vec(),
                stderr: format!("exit code: {status}"),
            })
        }
    }

    async fn exec_with_stdin(
        &self,
        args: &[String],
        stdin_data: &[u8],
    ) -> Result<String, DockerError> {
        use std::process::Stdio;
        use tokio::io::AsyncWriteExt;

        tracing::debug!(?args, "docker (stdin)");
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DockerError::NotFound { source: e })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(stdin_data)
                .await
                .map_err(|e| DockerError::StdinWrite { source: e })?;
            stdin
                .shutdown()
                .await
                .map_err(|e| DockerError::StdinWrite { source: e })?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| DockerError::NotFound { source: e })?;

        Self::finish(args, output)
    }
}
