//! Hoisting marked lines out of an operation body.
//!
//! A body line ending in [`FRONTMATTER_MARKER`] is a module-scope dependency
//! (typically an import). It is removed from the function body and emitted
//! once at the top of the synthesized script instead.

/// Trailing token marking a body line as frontmatter.
pub const FRONTMATTER_MARKER: &str = "# mason: frontmatter";

/// Body lines partitioned into frontmatter and the remaining body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    pub frontmatter: Vec<String>,
    pub body: Vec<String>,
}

/// Partition lines, keeping encounter order within each side.
pub fn split<I, S>(lines: I) -> Split
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = Split::default();
    for line in lines {
        let line = line.into();
        match line.trim_end().strip_suffix(FRONTMATTER_MARKER) {
            Some(stripped) => out.frontmatter.push(stripped.trim().to_owned()),
            None => out.body.push(line),
        }
    }
    out
}
