use std::path::Path;

pub async fn build(jar_path: &Path) -> anyhow::Result<()> {
    let container = super::load_container(jar_path)?;
    let client = super::docker_client()?;

    let output = container.build(&client).await?;
    for line in &output.logs {
        tracing::debug!("{line}");
    }

    println!("Built {} ({})", container.name(), output.image_id);
    Ok(())
}
