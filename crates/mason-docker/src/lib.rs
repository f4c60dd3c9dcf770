//! Container engine operations for mason.
//!
//! Every call goes through the `docker` CLI via a [`DockerExecutor`], so the
//! client can be exercised against mocks.

pub mod client;
pub mod docker;
pub mod executor;

pub use client::{BuildError, BuildOutput, DockerClient, LoginError, PushError, RunError};
pub use docker::DockerError;
pub use executor::{DockerExecutor, Endpoint, RealExecutor};
