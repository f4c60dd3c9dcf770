use mason::Value;
use mason::build::Arity;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct Report<'a> {
    name: &'a str,
    path: String,
    manifest: Vec<String>,
    options: Vec<OptionReport>,
    constants: Vec<ConstantReport<'a>>,
    paths: Vec<PathReport<'a>>,
    helpers: Vec<&'a str>,
}

#[derive(Serialize)]
struct OptionReport {
    name: String,
    #[serde(rename = "type")]
    ty: &'static str,
    multiple: bool,
    default: Option<String>,
}

#[derive(Serialize)]
struct ConstantReport<'a> {
    name: &'a str,
    value: &'a Value,
}

#[derive(Serialize)]
struct PathReport<'a> {
    name: &'a str,
    dev: &'a str,
    container: &'a str,
}

pub fn inspect(jar_path: &Path) -> anyhow::Result<()> {
    let container = super::load_container(jar_path)?;

    let report = Report {
        name: container.name(),
        path: container.path().display().to_string(),
        manifest: container
            .manifest_builder()
            .instructions()
            .iter()
            .map(ToString::to_string)
            .collect(),
        options: container
            .arg_spec()?
            .options
            .into_iter()
            .map(|o| OptionReport {
                ty: o.converter.name(),
                multiple: o.arity == Arity::OneOrMore,
                name: o.name,
                default: o.default,
            })
            .collect(),
        constants: container
            .constants()
            .map(|(name, value)| ConstantReport { name, value })
            .collect(),
        paths: container
            .paths()
            .iter()
            .map(|(name, mirror)| PathReport {
                name,
                dev: &mirror.dev_path,
                container: &mirror.container_path,
            })
            .collect(),
        helpers: container
            .helpers()
            .iter()
            .map(|h| h.exported_name.as_str())
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
