//! Declare a containerized program once; get its Dockerfile and a standalone
//! entry script.
//!
//! A [`Jar`] supplies the base image, build instructions, path mirrors,
//! constants and the entry operation. [`Container`] runs those hooks once and
//! renders, saves, builds, runs and pushes the result.
//!
//! Jars can also be declared in TOML and loaded with [`FileJar`].

pub mod container;
pub mod error;
pub mod file_jar;
pub mod jar;

pub use container::{Container, ENTRYPOINT_DIR};
pub use error::ContainerError;
pub use file_jar::FileJar;
pub use jar::{Attributes, ImageSetup, Jar};

pub use mason_core::*;

/// Manifest and script synthesis.
pub mod build {
    pub use mason_build::*;
}

/// Container engine client.
pub mod docker {
    pub use mason_docker::*;
}
