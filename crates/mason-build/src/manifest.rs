use mason_core::Keyword;

/// One `KEYWORD args` line of a build manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub keyword: Keyword,
    pub args: String,
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.keyword, self.args)
    }
}

/// Append-only Dockerfile builder seeded with `FROM <base>`.
///
/// Instructions are never validated, reordered, or removed; a later `USER`
/// or `WORKDIR` overrides an earlier one the way the engine itself does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    instructions: Vec<Instruction>,
}

impl Manifest {
    pub fn new(base_image: &str) -> Self {
        Self {
            instructions: vec![Instruction {
                keyword: Keyword::From,
                args: base_image.to_owned(),
            }],
        }
    }

    pub fn append(&mut self, keyword: Keyword, args: impl Into<String>) -> &mut Self {
        let args = args.into();
        tracing::debug!(%keyword, args = %args, "instruction appended");
        self.instructions.push(Instruction { keyword, args });
        self
    }

    /// Start another build stage.
    pub fn from_image(&mut self, image: &str) -> &mut Self {
        self.append(Keyword::From, image)
    }

    /// One `ENV` line per entry.
    pub fn env<I, S>(&mut self, vars: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for var in vars {
            self.append(Keyword::Env, var);
        }
        self
    }

    /// One `RUN` line per command.
    pub fn run<I, S>(&mut self, commands: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for command in commands {
            self.append(Keyword::Run, command);
        }
        self
    }

    /// `COPY [flag] src dst`
    pub fn copy(&mut self, src: &str, dst: &str, flag: Option<&str>) -> &mut Self {
        match flag {
            Some(flag) => self.append(Keyword::Copy, format!("{flag} {src} {dst}")),
            None => self.append(Keyword::Copy, format!("{src} {dst}")),
        }
    }

    pub fn add(&mut self, src: &str, dst: &str) -> &mut Self {
        self.append(Keyword::Add, format!("{src} {dst}"))
    }

    /// One `CMD` line per entry.
    pub fn cmd<I, S>(&mut self, commands: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for command in commands {
            self.append(Keyword::Cmd, command);
        }
        self
    }

    pub fn expose(&mut self, port: &str) -> &mut Self {
        self.append(Keyword::Expose, port)
    }

    pub fn user(&mut self, user: &str) -> &mut Self {
        self.append(Keyword::User, user)
    }

    pub fn workdir(&mut self, path: &str) -> &mut Self {
        self.append(Keyword::Workdir, path)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn render(&self) -> String {
        self.instructions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn renders_in_call_order() {
        let mut manifest = Manifest::new("base");
        manifest.run(["cmd1"]).copy("a", "b", None);

        assert_eq!(manifest.render(), "FROM base\nRUN cmd1\nCOPY a b");
        assert_eq!(manifest.render(), manifest.render());
    }

    #[test]
    fn copy_with_flag() {
        let mut manifest = Manifest::new("python:3.11");
        manifest.copy("main.py", "/entrypoint/", Some("--chown=app:app"));

        assert_eq!(
            manifest.instructions()[1].to_string(),
            "COPY --chown=app:app main.py /entrypoint/"
        );
    }

    #[test]
    fn variadic_helpers_emit_one_line_each() {
        let mut manifest = Manifest::new("alpine");
        manifest
            .env(["A=1", "B=2"])
            .run(["apk add git", "apk add curl"])
            .cmd(["[\"sh\"]"]);

        assert_eq!(manifest.len(), 6);
        assert_eq!(
            manifest.render(),
            "FROM alpine\nENV A=1\nENV B=2\nRUN apk add git\nRUN apk add curl\nCMD [\"sh\"]"
        );
    }

    #[test]
    fn duplicate_instructions_are_kept() {
        let mut manifest = Manifest::new("alpine");
        manifest.user("root").workdir("/a").user("app").workdir("/b");

        assert_eq!(
            manifest.render(),
            "FROM alpine\nUSER root\nWORKDIR /a\nUSER app\nWORKDIR /b"
        );
    }

    #[test]
    fn multi_stage_and_misc_keywords() {
        let mut manifest = Manifest::new("rust AS build");
        manifest
            .from_image("debian:bookworm-slim")
            .add("https://example.com/a.tgz", "/opt/")
            .expose("8080");

        let rendered = manifest.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "FROM debian:bookworm-slim");
        assert_eq!(lines[2], "ADD https://example.com/a.tgz /opt/");
        assert_eq!(lines[3], "EXPOSE 8080");
    }

    proptest! {
        #[test]
        fn n_appends_render_n_plus_one_lines(
            args in proptest::collection::vec("[a-z0-9 ./-]{1,20}", 0..30)
        ) {
            let mut manifest = Manifest::new("base");
            for arg in &args {
                manifest.append(Keyword::Run, arg.as_str());
            }

            let rendered = manifest.render();
            let lines: Vec<&str> = rendered.split('\n').collect();
            prop_assert_eq!(lines.len(), args.len() + 1);
            prop_assert_eq!(lines[0], "FROM base");
            for (line, arg) in lines[1..].iter().zip(&args) {
                prop_assert_eq!(line.to_string(), format!("RUN {arg}"));
            }
        }
    }
}
