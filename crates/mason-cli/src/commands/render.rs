use std::path::Path;

pub fn render(jar_path: &Path, manifest_only: bool, script_only: bool) -> anyhow::Result<()> {
    let container = super::load_container(jar_path)?;

    if !script_only {
        println!("{}", container.manifest());
    }
    if !manifest_only && !script_only {
        println!();
    }
    if !manifest_only {
        print!("{}", container.script()?);
    }
    Ok(())
}
