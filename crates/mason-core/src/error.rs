use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{keyword} instruction in {path} carries flag '{flag}'; only COPY takes a flag")]
    UnexpectedFlag {
        path: PathBuf,
        keyword: crate::Keyword,
        flag: String,
    },

    #[error("failed to read operation source {path}")]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Source extraction ──
    #[error("no `def` declaration found in source of operation '{operation}'")]
    MissingDeclaration { operation: String },

    #[error(
        "malformed indentation in operation '{operation}' at body line {line}: \
         width {width} is not a positive multiple of {unit}",
        unit = crate::INDENT
    )]
    MalformedIndentation {
        operation: String,
        line: usize,
        width: usize,
    },

    // ── CLI synthesis ──
    #[error("parameter '{parameter}' of operation '{operation}' has no type annotation")]
    MissingAnnotation {
        operation: String,
        parameter: String,
    },

    #[error(
        "parameter '{parameter}' is annotated as `{annotation}` — only bool, int, float, str \
         or a sequence of one of those can become a command-line option"
    )]
    UnsupportedType {
        parameter: String,
        annotation: String,
    },

    #[error("unknown argument '--{0}' — the entry operation declares no such parameter")]
    UnknownArgument(String),

    #[error("argument '--{name}' expects {expected}")]
    ArgumentType { name: String, expected: String },

    #[error("required argument '--{0}' was not supplied")]
    MissingArgument(String),

    // ── Registries ──
    #[error("path name '{0}' is not registered")]
    UnregisteredPathName(String),

    #[error("helper '{name}' is already registered with a different routine")]
    HelperMismatch { name: String },

    #[error("helper name '{0}' is reserved for the entry operation")]
    ReservedHelperName(String),

    #[error("constant '{name}' has no literal representation: {reason}")]
    NoLiteral { name: String, reason: &'static str },
}
