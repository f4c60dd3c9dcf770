//! Operations included as functions of the synthesized script.

use mason_core::Error;

use crate::operation::Operation;

/// Exported name of the entry operation.
pub const ENTRY_NAME: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperEntry {
    /// Function name in the synthesized script
    pub exported_name: String,
    /// Name the routine was declared under
    pub internal_reference: String,
    pub operation: Operation,
}

/// Registered operations in inclusion order; the entry operation is first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperRegistry {
    entries: Vec<HelperEntry>,
}

impl HelperRegistry {
    /// Seed the registry with the entry operation under [`ENTRY_NAME`].
    pub fn new(entry: Operation) -> Self {
        Self {
            entries: vec![HelperEntry {
                exported_name: ENTRY_NAME.to_owned(),
                internal_reference: entry.name.clone(),
                operation: entry,
            }],
        }
    }

    /// Register `operation` under `exported_name`.
    ///
    /// Returns `true` on first registration. Registering the identical
    /// routine again is a no-op; a different routine under a taken name fails.
    pub fn ensure_registered(
        &mut self,
        exported_name: &str,
        operation: Operation,
    ) -> mason_core::Result<bool> {
        if let Some(existing) = self.entries.iter().find(|e| e.exported_name == exported_name) {
            if existing.operation == operation {
                return Ok(false);
            }
            if exported_name == ENTRY_NAME {
                return Err(Error::ReservedHelperName(exported_name.to_owned()));
            }
            return Err(Error::HelperMismatch {
                name: exported_name.to_owned(),
            });
        }

        tracing::debug!(
            name = exported_name,
            reference = %operation.name,
            "helper registered"
        );
        self.entries.push(HelperEntry {
            exported_name: exported_name.to_owned(),
            internal_reference: operation.name.clone(),
            operation,
        });
        Ok(true)
    }

    pub fn entry(&self) -> &Operation {
        &self.entries[0].operation
    }

    pub fn get(&self, exported_name: &str) -> Option<&HelperEntry> {
        self.entries.iter().find(|e| e.exported_name == exported_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HelperEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(name: &str, body: &str) -> Operation {
        Operation::declare(name, vec![], body).unwrap()
    }

    #[test]
    fn entry_is_first_under_reserved_name() {
        let mut reg = HelperRegistry::new(op("entrypoint", "print(1)"));
        reg.ensure_registered("square", op("square", "return 4")).unwrap();

        let names: Vec<&str> = reg.iter().map(|e| e.exported_name.as_str()).collect();
        assert_eq!(names, vec!["main", "square"]);
        assert_eq!(reg.get("main").unwrap().internal_reference, "entrypoint");
    }

    #[test]
    fn identical_reregistration_is_noop() {
        let mut reg = HelperRegistry::new(op("entrypoint", "pass"));
        assert!(reg.ensure_registered("h", op("h", "return 1")).unwrap());
        assert!(!reg.ensure_registered("h", op("h", "return 1")).unwrap());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn different_routine_under_same_name_fails() {
        let mut reg = HelperRegistry::new(op("entrypoint", "pass"));
        reg.ensure_registered("h", op("h", "return 1")).unwrap();

        let err = reg.ensure_registered("h", op("h", "return 2")).unwrap_err();
        assert!(matches!(err, Error::HelperMismatch { .. }));
    }

    #[test]
    fn entry_name_is_reserved() {
        let mut reg = HelperRegistry::new(op("entrypoint", "pass"));
        let err = reg.ensure_registered("main", op("other", "pass")).unwrap_err();
        assert!(matches!(err, Error::ReservedHelperName(_)));
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut reg = HelperRegistry::new(op("entrypoint", "pass"));
        for name in ["c", "a", "b"] {
            reg.ensure_registered(name, op(name, "pass")).unwrap();
        }
        reg.ensure_registered("a", op("a", "pass")).unwrap();

        let names: Vec<&str> = reg.iter().skip(1).map(|e| e.exported_name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
