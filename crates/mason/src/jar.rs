use std::path::Path;

use mason_build::{HelperRegistry, Manifest, Operation, PathRegistry};
use mason_core::Value;

/// A declared containerized program.
///
/// ```rust,no_run
/// use mason::{Attributes, Container, ImageSetup, Jar};
/// use mason::build::Operation;
///
/// struct HelloWorld;
///
/// impl Jar for HelloWorld {
///     fn name(&self) -> &str {
///         "HelloWorld"
///     }
///
///     fn base_image(&self) -> &str {
///         "python:3.11-slim"
///     }
///
///     fn setup_image(&self, image: &mut ImageSetup<'_>) -> mason::Result<()> {
///         image.manifest().run(["python3 -m pip install numpy"]);
///         image.add_path_mirror("work", "./data", "/data");
///         Ok(())
///     }
///
///     fn constants(&self, attrs: &mut Attributes) -> mason::Result<()> {
///         attrs.set("scale", 2.0);
///         Ok(())
///     }
///
///     fn entrypoint(&self) -> mason::Result<Operation> {
///         Operation::from_source(
///             "def entrypoint(self, x: int):\n    print(x * self.scale)\n",
///         )
///     }
/// }
///
/// # fn main() -> Result<(), mason::ContainerError> {
/// let container = Container::new(HelloWorld, &Default::default())?;
/// println!("{}", container.manifest());
/// println!("{}", container.script()?);
/// # Ok(())
/// # }
/// ```
pub trait Jar {
    /// Declaration name; the container name is its lowercase form.
    fn name(&self) -> &str;

    fn base_image(&self) -> &str;

    /// Append build instructions and declare path mirrors.
    fn setup_image(&self, image: &mut ImageSetup<'_>) -> mason_core::Result<()>;

    /// Set attributes exported as script constants.
    fn constants(&self, _attrs: &mut Attributes) -> mason_core::Result<()> {
        Ok(())
    }

    /// The routine run when the script is executed.
    fn entrypoint(&self) -> mason_core::Result<Operation>;

    /// Register additional functions for the script, in inclusion order.
    fn register_helpers(&self, _helpers: &mut HelperRegistry) -> mason_core::Result<()> {
        Ok(())
    }
}

/// What the setup hook may touch.
pub struct ImageSetup<'a> {
    pub(crate) manifest: &'a mut Manifest,
    pub(crate) paths: &'a mut PathRegistry,
    pub(crate) attrs: &'a mut Attributes,
    pub(crate) save_path: &'a Path,
}

impl ImageSetup<'_> {
    pub fn manifest(&mut self) -> &mut Manifest {
        self.manifest
    }

    pub fn add_path_mirror(
        &mut self,
        name: impl Into<String>,
        dev_path: impl Into<String>,
        container_path: impl Into<String>,
    ) {
        self.paths.add(name, dev_path, container_path);
    }

    /// Set an attribute. Constants are not captured yet during setup.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.attrs.set(name, value);
    }

    /// Directory the container will be saved to.
    pub fn save_path(&self) -> &Path {
        self.save_path
    }
}

/// Attributes written on a declaration.
///
/// Every write is kept. Writes made once the constant registry exists, under
/// names without the private prefix, are also exported as constants; earlier
/// writes are not replayed.
#[derive(Debug, Default)]
pub struct Attributes {
    values: Vec<(String, Value)>,
    constants: Option<mason_build::ConstantRegistry>,
}

impl Attributes {
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match &mut self.constants {
            Some(registry) => {
                registry.observe(name, value.clone());
            }
            None => tracing::debug!(name, "constant registry not ready; attribute not exported"),
        }

        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((name.to_owned(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub(crate) fn enable_constants(&mut self) {
        self.constants.get_or_insert_with(Default::default);
    }

    pub(crate) fn constants(&self) -> Option<&mason_build::ConstantRegistry> {
        self.constants.as_ref()
    }
}
