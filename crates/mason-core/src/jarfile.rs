//! File-declared jars.
//!
//! A jar file is the TOML rendition of a declaration: base image, build
//! instructions, path mirrors, constants and the operation sources.
//!
//! ```toml
//! name = "HelloWorld"
//! base_image = "python:3.11-slim"
//!
//! [[instructions]]
//! keyword = "RUN"
//! args = "python3 -m pip install numpy"
//!
//! [[paths]]
//! name = "work"
//! dev = "./data"
//! container = "/data"
//!
//! [[constants]]
//! name = "scale"
//! value = 2.0
//!
//! [entrypoint]
//! source = "entry.py"
//!
//! [[helpers]]
//! name = "square"
//! source = "square.py"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Keyword, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JarFile {
    /// Declaration name; the container name is its lowercase form
    pub name: String,
    pub base_image: String,
    #[serde(default)]
    pub instructions: Vec<InstructionDecl>,
    #[serde(default)]
    pub paths: Vec<PathDecl>,
    /// Constants in declaration order
    #[serde(default)]
    pub constants: Vec<ConstantDecl>,
    pub entrypoint: OperationDecl,
    #[serde(default)]
    pub helpers: Vec<HelperDecl>,
    /// Directory the operation sources are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionDecl {
    pub keyword: Keyword,
    pub args: String,
    /// Leading flag token; only COPY accepts one (`--chown=app`)
    pub flag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDecl {
    pub name: String,
    pub dev: String,
    pub container: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantDecl {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationDecl {
    pub source: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperDecl {
    /// Function name in the synthesized script
    pub name: String,
    pub source: PathBuf,
}

impl JarFile {
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ConfigLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut jar: JarFile = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        let misplaced_flag = jar.instructions.iter().find_map(|d| match &d.flag {
            Some(flag) if d.keyword != Keyword::Copy => Some((d.keyword, flag.clone())),
            _ => None,
        });
        if let Some((keyword, flag)) = misplaced_flag {
            return Err(crate::Error::UnexpectedFlag {
                path: path.to_path_buf(),
                keyword,
                flag,
            });
        }
        jar.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        tracing::debug!(
            name = %jar.name,
            instructions = jar.instructions.len(),
            helpers = jar.helpers.len(),
            "jar file loaded"
        );
        Ok(jar)
    }

    /// Read an operation source relative to the jar file.
    pub fn read_source(&self, relative: &Path) -> crate::Result<String> {
        let path = self.base_dir.join(relative);
        std::fs::read_to_string(&path).map_err(|e| crate::Error::SourceRead { path, source: e })
    }
}
