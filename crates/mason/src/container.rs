use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mason_build::{ArgSpec, HelperRegistry, Manifest, PathRegistry, ScriptAssembler, save};
use mason_core::{MasonConfig, Value};
use mason_docker::{BuildOutput, DockerClient, DockerExecutor};
use secrecy::SecretString;

use crate::error::ContainerError;
use crate::jar::{Attributes, ImageSetup, Jar};

/// Directory the entry script is copied to inside the image.
pub const ENTRYPOINT_DIR: &str = "/entrypoint/";

/// A jar bound to its manifest, registries and runtime state.
///
/// Construction runs the declaration hooks exactly once, in order: `FROM`,
/// setup, entry script `COPY`, constants, helpers. Everything after that is
/// a read of the collected state, except `login` which records the registry.
pub struct Container<J: Jar> {
    jar: J,
    name: String,
    path: PathBuf,
    python: String,
    manifest: Manifest,
    paths: PathRegistry,
    attrs: Attributes,
    helpers: HelperRegistry,
    registry: Option<String>,
}

impl<J: Jar> std::fmt::Debug for Container<J> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<J: Jar> Container<J> {
    pub fn new(jar: J, config: &MasonConfig) -> Result<Self, ContainerError> {
        let name = jar.name().to_lowercase();
        let path = Path::new(&config.project.root).join(&name);

        let mut manifest = Manifest::new(jar.base_image());
        let mut paths = PathRegistry::new();
        let mut attrs = Attributes::default();

        jar.setup_image(&mut ImageSetup {
            manifest: &mut manifest,
            paths: &mut paths,
            attrs: &mut attrs,
            save_path: &path,
        })?;
        manifest.copy(save::SCRIPT_FILE, ENTRYPOINT_DIR, None);

        attrs.enable_constants();
        jar.constants(&mut attrs)?;

        let mut helpers = HelperRegistry::new(jar.entrypoint()?);
        jar.register_helpers(&mut helpers)?;

        tracing::debug!(
            container = %name,
            instructions = manifest.len(),
            helpers = helpers.len(),
            "container declared"
        );

        Ok(Self {
            jar,
            name,
            path,
            python: config.project.python.clone(),
            manifest,
            paths,
            attrs,
            helpers,
            registry: None,
        })
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }

    /// Lower-cased declaration name; also the local image tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the container is saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest(&self) -> String {
        self.manifest.render()
    }

    pub fn manifest_builder(&self) -> &Manifest {
        &self.manifest
    }

    pub fn script(&self) -> Result<String, ContainerError> {
        let constants = self.attrs.constants().cloned().unwrap_or_default();
        Ok(ScriptAssembler::new(&constants, &self.paths, &self.helpers).render()?)
    }

    pub fn arg_spec(&self) -> Result<ArgSpec, ContainerError> {
        Ok(ArgSpec::from_operation(self.helpers.entry())?)
    }

    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Constants exported to the script, in first-write order.
    pub fn constants(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.constants().into_iter().flat_map(|c| c.iter())
    }

    pub fn paths(&self) -> &PathRegistry {
        &self.paths
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    pub fn dev_path(&self, name: &str) -> Result<&str, ContainerError> {
        Ok(self.paths.dev_path(name)?)
    }

    pub fn container_path(&self, name: &str) -> Result<&str, ContainerError> {
        Ok(self.paths.container_path(name)?)
    }

    /// Name to dev-side path.
    pub fn path_dict(&self) -> BTreeMap<String, String> {
        self.paths.dev_projection()
    }

    /// Registry recorded by the last successful login.
    pub fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub fn is_saved(&self) -> bool {
        save::is_saved(&self.path)
    }

    /// Write the manifest and script to [`Container::path`].
    pub fn save(&self, overwrite: bool) -> Result<(), ContainerError> {
        let script = self.script()?;
        save::save(&self.path, &self.manifest(), &script, overwrite)?;
        Ok(())
    }

    /// Full command run inside the image for the given entry arguments.
    pub fn command(&self, args: &[(String, Value)]) -> Result<Vec<String>, ContainerError> {
        let argv = self.arg_spec()?.invocation(args)?;
        let mut command = vec![
            self.python.clone(),
            format!("{ENTRYPOINT_DIR}{}", save::SCRIPT_FILE),
        ];
        command.extend(argv);
        Ok(command)
    }

    /// Re-save the container, then build the image from its directory.
    pub async fn build<E: DockerExecutor>(
        &self,
        client: &DockerClient<E>,
    ) -> Result<BuildOutput, ContainerError> {
        self.save(true)?;
        Ok(client.build(&self.path, &self.name).await?)
    }

    /// Run the entry script in the built image and return its output.
    pub async fn run<E: DockerExecutor>(
        &self,
        client: &DockerClient<E>,
        args: &[(String, Value)],
    ) -> Result<String, ContainerError> {
        let command = self.command(args)?;
        Ok(client.run(&self.name, &command).await?)
    }

    pub async fn login<E: DockerExecutor>(
        &mut self,
        client: &DockerClient<E>,
        username: &str,
        registry: &str,
        password: &SecretString,
    ) -> Result<String, ContainerError> {
        let message = client.login(username, registry, password).await?;
        self.registry = Some(registry.to_owned());
        Ok(message)
    }

    /// Remote reference the image is pushed as.
    pub fn remote_tag(&self) -> Result<String, ContainerError> {
        let registry = self
            .registry
            .as_deref()
            .ok_or_else(|| ContainerError::NotLoggedIn(self.name.clone()))?;
        Ok(format!("{}/{}", registry.trim_end_matches('/'), self.name))
    }

    /// Tag the local image for the logged-in registry and push it.
    pub async fn push<E: DockerExecutor>(
        &self,
        client: &DockerClient<E>,
        verbose: bool,
    ) -> Result<Vec<String>, ContainerError> {
        let remote = self.remote_tag()?;
        client.tag(&self.name, &remote).await?;
        Ok(client.push(&remote, verbose).await?)
    }
}
