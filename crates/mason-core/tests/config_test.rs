use mason_core::{JarFile, Keyword, MasonConfig, Value};
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = MasonConfig::load(tmp.path()).unwrap();

    assert_eq!(config.project.root, ".");
    assert_eq!(config.project.python, "python3");
    assert_eq!(config.registry.default, "registry.hub.docker.com");
    assert!(config.registry.username.is_none());
    assert!(config.docker.host.is_none());
    assert!(config.docker.context.is_none());
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[project]
root = "build"
python = "python"

[registry]
default = "ghcr.io/acme"
username = "octo"

[docker]
host = "ssh://builder"
"#;
    std::fs::write(tmp.path().join("mason.toml"), toml).unwrap();

    let config = MasonConfig::load(tmp.path()).unwrap();

    assert_eq!(config.project.root, "build");
    assert_eq!(config.project.python, "python");
    assert_eq!(config.registry.default, "ghcr.io/acme");
    assert_eq!(config.registry.username.as_deref(), Some("octo"));
    assert_eq!(config.docker.host.as_deref(), Some("ssh://builder"));
    assert!(config.docker.context.is_none());
}

#[test]
fn load_partial_config_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("mason.toml"), "[project]\nroot = \"out\"\n").unwrap();

    let config = MasonConfig::load(tmp.path()).unwrap();

    assert_eq!(config.project.root, "out");
    assert_eq!(config.project.python, "python3");
    assert_eq!(config.registry.default, "registry.hub.docker.com");
}

#[test]
fn load_invalid_toml_reports_path() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("mason.toml"), "[project\nroot = 1").unwrap();

    let err = MasonConfig::load(tmp.path()).unwrap_err().to_string();
    assert!(err.contains("mason.toml"), "got: {err}");
}

#[test]
fn jar_file_parses_declaration() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
name = "HelloWorld"
base_image = "python:3.11-slim"

[[instructions]]
keyword = "RUN"
args = "python3 -m pip install numpy"

[[instructions]]
keyword = "COPY"
flag = "--chown=app"
args = "data /data"

[[paths]]
name = "work"
dev = "/dev/proj"
container = "/container/proj"

[[constants]]
name = "a"
value = 0

[[constants]]
name = "b"
value = "1"

[entrypoint]
source = "entry.py"
"#;
    let path = tmp.path().join("jar.toml");
    std::fs::write(&path, toml).unwrap();
    std::fs::write(tmp.path().join("entry.py"), "def entrypoint(self):\n    pass\n").unwrap();

    let jar = JarFile::load(&path).unwrap();

    assert_eq!(jar.name, "HelloWorld");
    assert_eq!(jar.instructions.len(), 2);
    assert_eq!(jar.instructions[0].keyword, Keyword::Run);
    assert_eq!(jar.instructions[1].flag.as_deref(), Some("--chown=app"));
    assert_eq!(jar.paths[0].container, "/container/proj");
    assert_eq!(jar.constants[0].value, Value::Int(0));
    assert_eq!(jar.constants[1].value, Value::Str("1".to_owned()));
    assert!(jar.helpers.is_empty());

    let source = jar.read_source(&jar.entrypoint.source).unwrap();
    assert!(source.starts_with("def entrypoint"));
}

#[test]
fn jar_file_rejects_unknown_keyword() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
name = "Bad"
base_image = "alpine"

[[instructions]]
keyword = "HEALTHCHECK"
args = "CMD true"

[entrypoint]
source = "entry.py"
"#;
    let path = tmp.path().join("jar.toml");
    std::fs::write(&path, toml).unwrap();

    assert!(JarFile::load(&path).is_err());
}

#[test]
fn jar_file_rejects_flag_outside_copy() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
name = "Bad"
base_image = "alpine"

[[instructions]]
keyword = "COPY"
args = "a /a"
flag = "--chown=app"

[[instructions]]
keyword = "RUN"
args = "true"
flag = "--mount=type=cache,target=/root/.cache"

[entrypoint]
source = "entry.py"
"#;
    let path = tmp.path().join("jar.toml");
    std::fs::write(&path, toml).unwrap();

    let err = JarFile::load(&path).unwrap_err();
    assert!(matches!(
        err,
        mason_core::Error::UnexpectedFlag { keyword: Keyword::Run, ref flag, .. }
            if flag.starts_with("--mount")
    ));
}

#[test]
fn jar_file_missing_source_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("jar.toml");
    std::fs::write(
        &path,
        "name = \"X\"\nbase_image = \"alpine\"\n[entrypoint]\nsource = \"nope.py\"\n",
    )
    .unwrap();

    let jar = JarFile::load(&path).unwrap();
    let err = jar.read_source(&jar.entrypoint.source).unwrap_err().to_string();
    assert!(err.contains("nope.py"), "got: {err}");
}
