//! Path mirrors: named development-side / container-side path pairs.

use std::collections::BTreeMap;

use mason_core::Error;
use mason_core::value::quote;

/// Name of the container-side mapping embedded in the script.
pub const PATH_DICT_NAME: &str = "path_dict";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMirror {
    /// Path in the development environment
    pub dev_path: String,
    /// Path inside the container
    pub container_path: String,
}

/// Path mirrors keyed by logical name, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRegistry {
    mirrors: Vec<(String, PathMirror)>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mirror; a second registration under the same name replaces it.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        dev_path: impl Into<String>,
        container_path: impl Into<String>,
    ) {
        let name = name.into();
        let mirror = PathMirror {
            dev_path: dev_path.into(),
            container_path: container_path.into(),
        };
        tracing::debug!(
            name = %name,
            dev = %mirror.dev_path,
            container = %mirror.container_path,
            "path mirror added"
        );

        match self.mirrors.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => {
                tracing::warn!(name = %name, "path mirror replaced");
                *existing = mirror;
            }
            None => self.mirrors.push((name, mirror)),
        }
    }

    pub fn get(&self, name: &str) -> mason_core::Result<&PathMirror> {
        self.mirrors
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
            .ok_or_else(|| Error::UnregisteredPathName(name.to_owned()))
    }

    pub fn dev_path(&self, name: &str) -> mason_core::Result<&str> {
        self.get(name).map(|m| m.dev_path.as_str())
    }

    pub fn container_path(&self, name: &str) -> mason_core::Result<&str> {
        self.get(name).map(|m| m.container_path.as_str())
    }

    pub fn dev_projection(&self) -> BTreeMap<String, String> {
        self.mirrors
            .iter()
            .map(|(n, m)| (n.clone(), m.dev_path.clone()))
            .collect()
    }

    pub fn container_projection(&self) -> BTreeMap<String, String> {
        self.mirrors
            .iter()
            .map(|(n, m)| (n.clone(), m.container_path.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathMirror)> {
        self.mirrors.iter().map(|(n, m)| (n.as_str(), m))
    }

    pub fn is_empty(&self) -> bool {
        self.mirrors.is_empty()
    }

    /// `path_dict = {...}` with the container-side paths, or `None` when no
    /// mirror is registered.
    pub fn render(&self) -> Option<String> {
        if self.mirrors.is_empty() {
            return None;
        }
        let entries: Vec<String> = self
            .mirrors
            .iter()
            .map(|(n, m)| format!("{}: {}", quote(n), quote(&m.container_path)))
            .collect();
        Some(format!("{PATH_DICT_NAME} = {{{}}}", entries.join(", ")))
    }
}
