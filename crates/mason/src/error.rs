use mason_build::save::SaveError;
use mason_docker::{BuildError, LoginError, PushError, RunError};

#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error(transparent)]
    Core(#[from] mason_core::Error),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Login(#[from] LoginError),

    #[error(transparent)]
    Push(#[from] PushError),

    #[error("'{0}' has no registry; log in before pushing")]
    NotLoggedIn(String),
}
