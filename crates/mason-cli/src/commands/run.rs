use mason::Value;
use mason::build::{ArgSpec, Arity, ScalarType};
use std::path::Path;

pub async fn run(jar_path: &Path, raw_args: &[String]) -> anyhow::Result<()> {
    let container = super::load_container(jar_path)?;
    let args = parse_args(&container.arg_spec()?, raw_args)?;

    let client = super::docker_client()?;
    let output = container.run(&client, &args).await?;

    print!("{output}");
    Ok(())
}

/// Convert `NAME=VALUE` pairs into typed entry arguments.
///
/// Names the entry does not declare pass through as strings so the
/// invocation reports them.
fn parse_args(spec: &ArgSpec, raw: &[String]) -> anyhow::Result<Vec<(String, Value)>> {
    raw.iter()
        .map(|pair| {
            let (name, text) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected NAME=VALUE, got '{pair}'"))?;

            let Some(option) = spec.options.iter().find(|o| o.name == name) else {
                return Ok((name.to_owned(), Value::from(text)));
            };

            let value = match option.arity {
                Arity::One => scalar(option.converter, name, text)?,
                Arity::OneOrMore => Value::List(
                    text.split(',')
                        .map(|item| scalar(option.converter, name, item))
                        .collect::<anyhow::Result<_>>()?,
                ),
            };
            Ok((name.to_owned(), value))
        })
        .collect()
}

fn scalar(ty: ScalarType, name: &str, text: &str) -> anyhow::Result<Value> {
    let invalid = |e: &dyn std::fmt::Display| {
        anyhow::anyhow!("--{name}: '{text}' is not a valid {}: {e}", ty.name())
    };
    Ok(match ty {
        ScalarType::Bool => Value::Bool(matches!(
            text.to_lowercase().as_str(),
            "1" | "true" | "yes"
        )),
        ScalarType::Int => Value::Int(text.parse().map_err(|e| invalid(&e))?),
        ScalarType::Float => Value::Float(text.parse().map_err(|e| invalid(&e))?),
        ScalarType::Str => Value::from(text),
    })
}
