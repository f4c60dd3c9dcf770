//! Operation source extraction.
//!
//! Turns the text of a routine declaration (`def name(self, ...):` followed
//! by an indented body) into an [`Operation`]: parameters without the
//! receiver, body lines dedented to column zero with receiver attribute
//! references rewritten to module-level names, and frontmatter split off.

use mason_core::{Error, INDENT};

use crate::frontmatter;
use crate::operation::{Operation, Param};

/// Parameter names treated as the receiver when in position 0.
const RECEIVERS: &[&str] = &["self", "cls"];

/// Extract an operation from its declaration source.
pub fn extract(source: &str) -> mason_core::Result<Operation> {
    let lines: Vec<&str> = source.lines().collect();

    let decl_start = lines
        .iter()
        .position(|l| is_def_line(l))
        .ok_or_else(|| Error::MissingDeclaration {
            operation: first_words(source),
        })?;

    let signature = Signature::parse(&lines[decl_start..]).ok_or_else(|| {
        Error::MissingDeclaration {
            operation: first_words(source),
        }
    })?;

    let mut params = signature.params;
    let receiver = match params.first() {
        Some(p) if RECEIVERS.contains(&p.name.as_str()) => Some(params.remove(0).name),
        _ => None,
    };

    let body_source = &lines[decl_start + signature.line_count..];
    let mut body = if signature.inline_body.is_empty() {
        let first = body_source.iter().position(|l| !l.trim().is_empty());
        if let Some(first) = first {
            let width = indentation(&signature.name, 1, body_source[first])?;
            if width == 0 {
                return Err(Error::MalformedIndentation {
                    operation: signature.name,
                    line: 1,
                    width,
                });
            }
        }
        dedent(&signature.name, body_source)?
    } else {
        vec![signature.inline_body]
    };

    if let Some(receiver) = &receiver {
        for line in &mut body {
            *line = strip_receiver_refs(line, receiver);
        }
    }

    let split = frontmatter::split(body);
    tracing::debug!(
        operation = %signature.name,
        params = params.len(),
        body = split.body.len(),
        frontmatter = split.frontmatter.len(),
        "operation source extracted"
    );

    Ok(Operation {
        name: signature.name,
        params,
        body: split.body,
        frontmatter: split.frontmatter,
    })
}

/// Strip the body indentation of a block.
///
/// The first non-blank line sets the base width, which must be a multiple of
/// [`INDENT`] (zero allowed). Later lines lose the base width when they have
/// at least that many leading spaces and are kept as written otherwise, so
/// hanging continuations and string literal content survive. Blank lines are
/// dropped.
pub fn dedent(operation: &str, lines: &[&str]) -> mason_core::Result<Vec<String>> {
    let mut out = Vec::with_capacity(lines.len());
    let mut base_width = None;

    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        let base = match base_width {
            Some(width) => width,
            None => {
                let width = indentation(operation, 1, line)?;
                base_width = Some(width);
                width
            }
        };
        let leading = line.len() - line.trim_start_matches(' ').len();
        let kept = if leading >= base { &line[base..] } else { *line };
        out.push(kept.trim_end().to_owned());
    }

    Ok(out)
}

/// Leading space count of a line; tabs or a width off the indent grid fail.
fn indentation(operation: &str, line_no: usize, line: &str) -> mason_core::Result<usize> {
    let width = line.len() - line.trim_start_matches(' ').len();
    let next = line[width..].chars().next();
    if next == Some('\t') || width % INDENT != 0 {
        return Err(Error::MalformedIndentation {
            operation: operation.to_owned(),
            line: line_no,
            width,
        });
    }
    Ok(width)
}

/// Rewrite `self.name` to `name` where `self` starts an identifier.
fn strip_receiver_refs(line: &str, receiver: &str) -> String {
    let pattern = format!("{receiver}.");
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(idx) = rest.find(&pattern) {
        let preceded_by_ident = rest[..idx]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.');
        out.push_str(&rest[..idx]);
        if preceded_by_ident {
            out.push_str(&pattern);
        }
        rest = &rest[idx + pattern.len()..];
    }
    out.push_str(rest);
    out
}

fn is_def_line(line: &str) -> bool {
    line.trim_start().starts_with("def ")
}

fn first_words(source: &str) -> String {
    source
        .lines()
        .find(|l| !l.trim().is_empty())
        .map(|l| l.trim().chars().take(40).collect())
        .unwrap_or_else(|| "<empty>".to_owned())
}

struct Signature {
    name: String,
    params: Vec<Param>,
    /// Statement following the colon on the declaration line, if any
    inline_body: String,
    /// Lines the declaration spans
    line_count: usize,
}

impl Signature {
    /// Parse `def name(params) -> ret:` which may span several lines.
    fn parse(lines: &[&str]) -> Option<Self> {
        let mut text = String::new();
        let mut line_count = 0;
        let mut close = None;

        for line in lines {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(line.trim());
            line_count += 1;
            let open = text.find('(')?;
            if let Some(end) = matching_paren(&text, open) {
                close = Some((open, end));
                break;
            }
        }

        let (open, end) = close?;
        let name = text.strip_prefix("def ")?.split('(').next()?.trim().to_owned();
        if name.is_empty() {
            return None;
        }

        let tail = &text[end + 1..];
        let colon = top_level_find(tail, ':')?;
        let inline_body = tail[colon + 1..].trim().to_owned();

        let params = split_top_level(&text[open + 1..end], ',')
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(parse_param)
            .collect();

        Some(Self {
            name,
            params,
            inline_body,
            line_count,
        })
    }
}

fn parse_param(text: &str) -> Param {
    let (head, default) = match top_level_find(text, '=') {
        Some(i) => (&text[..i], Some(text[i + 1..].trim().to_owned())),
        None => (text, None),
    };
    let (name, annotation) = match head.split_once(':') {
        Some((name, ann)) => (name.trim(), Some(ann.trim().to_owned())),
        None => (head.trim(), None),
    };
    Param {
        name: name.to_owned(),
        annotation,
        default,
    }
}

/// Index of the `)` closing the `(` at `open`, skipping string literals.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in text.char_indices().skip_while(|(i, _)| *i < open) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(' | '[' | '{') => depth += 1,
            (None, ')' | ']' | '}') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// First occurrence of `needle` outside brackets and string literals.
fn top_level_find(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(' | '[' | '{') => depth += 1,
            (None, ')' | ']' | '}') => depth = depth.saturating_sub(1),
            (None, c) if c == needle && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;
    while let Some(i) = top_level_find(rest, sep) {
        parts.push(&rest[..i]);
        rest = &rest[i + sep.len_utf8()..];
    }
    parts.push(rest);
    parts
}
