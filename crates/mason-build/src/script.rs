use crate::cli::ArgSpec;
use crate::constants::ConstantRegistry;
use crate::helpers::{ENTRY_NAME, HelperRegistry};
use crate::paths::PathRegistry;

/// Assembles the standalone entry script from the registries.
///
/// Sections, each separated by one blank line:
///
/// 1. frontmatter of every registered operation, one block per operation
/// 2. constants, followed by `path_dict` when path mirrors exist
/// 3. one function per registered operation, entry first
/// 4. the `__main__` bootstrap
///
/// Rendering only reads the registries, so repeated calls are identical.
pub struct ScriptAssembler<'a> {
    constants: &'a ConstantRegistry,
    paths: &'a PathRegistry,
    helpers: &'a HelperRegistry,
}

impl<'a> ScriptAssembler<'a> {
    pub fn new(
        constants: &'a ConstantRegistry,
        paths: &'a PathRegistry,
        helpers: &'a HelperRegistry,
    ) -> Self {
        Self {
            constants,
            paths,
            helpers,
        }
    }

    pub fn render(&self) -> mason_core::Result<String> {
        // Fail before producing any text.
        let arg_spec = ArgSpec::from_operation(self.helpers.entry())?;
        let mut constants = self.constants.render()?;

        let mut sections = Vec::new();

        let frontmatter: Vec<String> = self
            .helpers
            .iter()
            .filter(|h| !h.operation.frontmatter.is_empty())
            .map(|h| h.operation.frontmatter.join("\n"))
            .collect();
        if !frontmatter.is_empty() {
            sections.push(frontmatter.join("\n\n"));
        }

        constants.extend(self.paths.render());
        if !constants.is_empty() {
            sections.push(constants.join("\n"));
        }

        for helper in self.helpers.iter() {
            sections.push(helper.operation.render_function(&helper.exported_name));
        }

        sections.push(arg_spec.render_bootstrap(ENTRY_NAME));

        let mut script = sections.join("\n\n");
        script.push('\n');
        Ok(script)
    }
}
