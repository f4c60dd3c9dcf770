use serde::{Deserialize, Serialize};

/// Build-manifest instruction keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Keyword {
    From,
    Env,
    Run,
    Copy,
    Add,
    Cmd,
    Expose,
    User,
    Workdir,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::From => "FROM",
            Keyword::Env => "ENV",
            Keyword::Run => "RUN",
            Keyword::Copy => "COPY",
            Keyword::Add => "ADD",
            Keyword::Cmd => "CMD",
            Keyword::Expose => "EXPOSE",
            Keyword::User => "USER",
            Keyword::Workdir => "WORKDIR",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
