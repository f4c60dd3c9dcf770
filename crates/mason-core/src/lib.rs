//! Core types and configuration for mason.
//!
//! This crate defines the `mason.toml` schema ([`MasonConfig`]), the jar
//! declaration file ([`JarFile`]), script literal values ([`Value`]) and the
//! shared error taxonomy.

pub mod config;
pub mod error;
pub mod instruction;
pub mod jarfile;
pub mod value;

pub use config::{DEFAULT_REGISTRY, DockerConfig, MasonConfig, ProjectConfig, RegistryConfig};
pub use error::{Error, Result};
pub use instruction::Keyword;
pub use jarfile::{ConstantDecl, HelperDecl, InstructionDecl, JarFile, OperationDecl, PathDecl};
pub use value::Value;

/// Indentation unit of operation sources and the synthesized script.
pub const INDENT: usize = 4;
