use serde::{Deserialize, Serialize};

/// Registry used by `login` when none is given.
pub const DEFAULT_REGISTRY: &str = "registry.hub.docker.com";

/// mason.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasonConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub docker: DockerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Directory under which `<container>/` is saved
    #[serde(default = "default_root")]
    pub root: String,
    /// Interpreter that runs the synthesized script inside the container
    #[serde(default = "default_python")]
    pub python: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry host used by `login`/`push`
    #[serde(default = "default_registry")]
    pub default: String,
    /// Registry account name
    pub username: Option<String>,
}

/// Docker daemon selection; at most one of `host` and `context` may be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Daemon socket passed as `--host` (`ssh://builder`, `tcp://10.0.0.5:2376`)
    pub host: Option<String>,
    /// Named docker context passed as `--context`
    pub context: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            python: default_python(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default: default_registry(),
            username: None,
        }
    }
}

impl MasonConfig {
    /// Load from mason.toml at the given path, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join("mason.toml");
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            tracing::debug!(path = %config_path.display(), "loading mason.toml");
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_root() -> String {
    ".".to_owned()
}

fn default_python() -> String {
    "python3".to_owned()
}

fn default_registry() -> String {
    DEFAULT_REGISTRY.to_owned()
}
