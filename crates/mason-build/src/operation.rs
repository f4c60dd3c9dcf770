//! Operations: the routines that become functions of the synthesized script.

use mason_core::INDENT;

/// Scalar types a command-line option value can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    Int,
    Float,
    Str,
}

impl ScalarType {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "bool" => Some(ScalarType::Bool),
            "int" => Some(ScalarType::Int),
            "float" => Some(ScalarType::Float),
            "str" => Some(ScalarType::Str),
            _ => None,
        }
    }

    /// Type name as written in the script.
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Str => "str",
        }
    }
}

/// A parameter annotation, classified for CLI synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Scalar(ScalarType),
    Sequence(ScalarType),
    /// Anything else; kept verbatim so the function still renders.
    Other(String),
}

impl Annotation {
    /// Classify annotation text.
    ///
    /// Sequences are `list[T]`, `List[T]`, `Sequence[T]`, `tuple[T, ...]` and
    /// `Tuple[T, ...]`, optionally `typing.`-qualified, with `T` a scalar.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some(scalar) = ScalarType::parse(text) {
            return Annotation::Scalar(scalar);
        }

        let unqualified = text.strip_prefix("typing.").unwrap_or(text);
        let Some((container, rest)) = unqualified.split_once('[') else {
            return Annotation::Other(text.to_owned());
        };
        let Some(inner) = rest.strip_suffix(']') else {
            return Annotation::Other(text.to_owned());
        };

        let element = match container.trim() {
            "list" | "List" | "Sequence" => Some(inner),
            "tuple" | "Tuple" => inner
                .split_once(',')
                .filter(|(_, ellipsis)| ellipsis.trim() == "...")
                .map(|(element, _)| element),
            _ => None,
        };

        match element.and_then(ScalarType::parse) {
            Some(scalar) => Annotation::Sequence(scalar),
            None => Annotation::Other(text.to_owned()),
        }
    }
}

/// One declared parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Name as declared, including `*`/`**` for variadics
    pub name: String,
    /// Annotation text as declared
    pub annotation: Option<String>,
    /// Default value text as declared
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: Some(annotation.into()),
            default: None,
        }
    }

    pub fn scalar(name: impl Into<String>, ty: ScalarType) -> Self {
        Self::new(name, ty.name())
    }

    pub fn sequence(name: impl Into<String>, ty: ScalarType) -> Self {
        Self::new(name, format!("list[{}]", ty.name()))
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Bare `*` or `/` separators in a parameter list.
    pub fn is_marker(&self) -> bool {
        self.name == "*" || self.name == "/"
    }

    pub fn is_variadic(&self) -> bool {
        self.name.starts_with('*') && !self.is_marker()
    }

    pub fn annotation_kind(&self) -> Option<Annotation> {
        self.annotation.as_deref().map(Annotation::parse)
    }

    fn render(&self) -> String {
        match (&self.annotation, &self.default) {
            (Some(ann), Some(default)) => format!("{}: {ann} = {default}", self.name),
            (Some(ann), None) => format!("{}: {ann}", self.name),
            (None, Some(default)) => format!("{}={default}", self.name),
            (None, None) => self.name.clone(),
        }
    }
}

/// A routine included in the synthesized script.
///
/// `body` is dedented to column zero and `frontmatter` holds the lines hoisted
/// to module scope. Both keep their relative source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Name the routine was declared under
    pub name: String,
    /// Parameters with the receiver removed
    pub params: Vec<Param>,
    pub body: Vec<String>,
    pub frontmatter: Vec<String>,
}

impl Operation {
    /// Build an operation from an explicit description.
    ///
    /// `body` is dedented like extracted source (base indentation may be zero)
    /// and split into frontmatter and body lines.
    pub fn declare(
        name: impl Into<String>,
        params: Vec<Param>,
        body: &str,
    ) -> mason_core::Result<Self> {
        let name = name.into();
        let lines: Vec<&str> = body.lines().collect();
        let dedented = crate::source::dedent(&name, &lines)?;
        let split = crate::frontmatter::split(dedented);
        Ok(Self {
            name,
            params,
            body: split.body,
            frontmatter: split.frontmatter,
        })
    }

    /// Extract an operation from the source text of its declaration.
    pub fn from_source(source: &str) -> mason_core::Result<Self> {
        crate::source::extract(source)
    }

    /// Add a module-scope dependency line (e.g. an import).
    pub fn with_frontmatter(mut self, line: impl Into<String>) -> Self {
        self.frontmatter.push(line.into());
        self
    }

    /// Render as a standalone function named `exported_name`.
    pub fn render_function(&self, exported_name: &str) -> String {
        let params: Vec<String> = self.params.iter().map(Param::render).collect();
        let indent = " ".repeat(INDENT);

        let mut out = format!("def {exported_name}({}):", params.join(", "));
        if self.body.is_empty() {
            out.push('\n');
            out.push_str(&indent);
            out.push_str("pass");
        }
        for line in &self.body {
            out.push('\n');
            out.push_str(&indent);
            out.push_str(line);
        }
        out
    }
}
