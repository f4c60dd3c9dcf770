use mason_build::{HelperRegistry, Operation};
use mason_core::{JarFile, Keyword};

use crate::jar::{Attributes, ImageSetup, Jar};

/// A jar declared in a TOML file, with operation sources next to it.
#[derive(Debug, Clone)]
pub struct FileJar {
    file: JarFile,
}

impl FileJar {
    pub fn new(file: JarFile) -> Self {
        Self { file }
    }

    pub fn load(path: &std::path::Path) -> mason_core::Result<Self> {
        JarFile::load(path).map(Self::new)
    }

    pub fn file(&self) -> &JarFile {
        &self.file
    }
}

impl Jar for FileJar {
    fn name(&self) -> &str {
        &self.file.name
    }

    fn base_image(&self) -> &str {
        &self.file.base_image
    }

    fn setup_image(&self, image: &mut ImageSetup<'_>) -> mason_core::Result<()> {
        for decl in &self.file.instructions {
            match (decl.keyword, decl.flag.as_deref()) {
                (Keyword::Copy, Some(flag)) => {
                    image
                        .manifest()
                        .append(Keyword::Copy, format!("{flag} {}", decl.args));
                }
                (keyword, Some(flag)) => {
                    tracing::warn!(%keyword, flag, "flag ignored; only COPY takes one");
                    image.manifest().append(keyword, decl.args.as_str());
                }
                (keyword, None) => {
                    image.manifest().append(keyword, decl.args.as_str());
                }
            }
        }
        for path in &self.file.paths {
            image.add_path_mirror(&path.name, &path.dev, &path.container);
        }
        Ok(())
    }

    fn constants(&self, attrs: &mut Attributes) -> mason_core::Result<()> {
        for constant in &self.file.constants {
            attrs.set(&constant.name, constant.value.clone());
        }
        Ok(())
    }

    fn entrypoint(&self) -> mason_core::Result<Operation> {
        Operation::from_source(&self.file.read_source(&self.file.entrypoint.source)?)
    }

    fn register_helpers(&self, helpers: &mut HelperRegistry) -> mason_core::Result<()> {
        for helper in &self.file.helpers {
            let operation = Operation::from_source(&self.file.read_source(&helper.source)?)?;
            helpers.ensure_registered(&helper.name, operation)?;
        }
        Ok(())
    }
}
