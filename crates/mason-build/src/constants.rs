//! Constants exported into the synthesized script.

use mason_core::{Error, Value};

/// Names starting with this marker are private and never exported.
pub const PRIVATE_PREFIX: char = '_';

/// Ordered name → value table.
///
/// Entries keep the position of their first write; later writes replace the
/// value in place so rendered scripts diff cleanly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantRegistry {
    entries: Vec<(String, Value)>,
}

impl ConstantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attribute write. Returns whether it was captured.
    pub fn observe(&mut self, name: &str, value: Value) -> bool {
        if name.starts_with(PRIVATE_PREFIX) {
            tracing::debug!(name, "private attribute not exported");
            return false;
        }

        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => {
                tracing::warn!(name, "constant overwritten");
                *existing = value;
            }
            None => {
                tracing::debug!(name, "constant recorded");
                self.entries.push((name.to_owned(), value));
            }
        }
        true
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `name = <literal>` line per entry, in first-write order.
    pub fn render(&self) -> mason_core::Result<Vec<String>> {
        self.entries
            .iter()
            .map(|(name, value)| {
                value
                    .to_literal()
                    .map(|literal| format!("{name} = {literal}"))
                    .map_err(|reason| Error::NoLiteral {
                        name: name.clone(),
                        reason,
                    })
            })
            .collect()
    }
}
