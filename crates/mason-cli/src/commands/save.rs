use std::path::Path;

pub fn save(jar_path: &Path, overwrite: bool) -> anyhow::Result<()> {
    let container = super::load_container(jar_path)?;
    container.save(overwrite)?;

    println!("Saved {} to {}", container.name(), container.path().display());
    Ok(())
}
