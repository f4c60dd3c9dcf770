//! Command-line synthesis for the entry operation.
//!
//! The same [`ArgSpec`] drives both sides of the script's command line: the
//! `argparse` bootstrap emitted into the script, and the argument vector built
//! when the script is invoked inside the container.

use mason_core::{Error, INDENT, Value};

use crate::operation::{Annotation, Operation, ScalarType};

/// Number of values an option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    OneOrMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Option name without the leading `--`
    pub name: String,
    /// Per-token value converter
    pub converter: ScalarType,
    pub arity: Arity,
    /// Default value text; options without one are required
    pub default: Option<String>,
}

/// Command-line options derived from the entry operation's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub options: Vec<OptionSpec>,
}

impl ArgSpec {
    /// Derive options from an operation's parameters.
    ///
    /// Every parameter is checked before anything is returned: the first
    /// unannotated parameter or unsupported annotation fails the whole derivation.
    pub fn from_operation(operation: &Operation) -> mason_core::Result<Self> {
        let mut options = Vec::with_capacity(operation.params.len());

        for param in operation.params.iter().filter(|p| !p.is_marker()) {
            let Some(kind) = param.annotation_kind() else {
                return Err(Error::MissingAnnotation {
                    operation: operation.name.clone(),
                    parameter: param.name.clone(),
                });
            };
            if param.is_variadic() {
                return Err(Error::UnsupportedType {
                    parameter: param.name.clone(),
                    annotation: param.annotation.clone().unwrap_or_default(),
                });
            }

            let (converter, arity) = match kind {
                Annotation::Scalar(ty) => (ty, Arity::One),
                Annotation::Sequence(ty) => (ty, Arity::OneOrMore),
                Annotation::Other(text) => {
                    return Err(Error::UnsupportedType {
                        parameter: param.name.clone(),
                        annotation: text,
                    });
                }
            };

            options.push(OptionSpec {
                name: param.name.clone(),
                converter,
                arity,
                default: param.default.clone(),
            });
        }

        Ok(Self { options })
    }

    /// Render the `__main__` bootstrap dispatching into `entry`.
    ///
    /// With no options the bootstrap is a bare call; no parser is built.
    pub fn render_bootstrap(&self, entry: &str) -> String {
        let indent = " ".repeat(INDENT);
        let mut lines = vec!["if __name__ == '__main__':".to_owned()];

        if self.options.is_empty() {
            lines.push(format!("{indent}{entry}()"));
            return lines.join("\n");
        }

        lines.push(format!("{indent}import argparse"));
        lines.push(format!("{indent}parser = argparse.ArgumentParser()"));
        for option in &self.options {
            lines.push(format!("{indent}{}", option.render()));
        }
        lines.push(format!("{indent}kwargs = vars(parser.parse_args())"));
        lines.push(format!("{indent}{entry}(**kwargs)"));
        lines.join("\n")
    }

    /// Build the script argument vector for a set of named values.
    ///
    /// Arguments are emitted in option order. Unknown names, values of the
    /// wrong type and missing required options are rejected.
    pub fn invocation(&self, args: &[(String, Value)]) -> mason_core::Result<Vec<String>> {
        if let Some((name, _)) = args
            .iter()
            .find(|(name, _)| !self.options.iter().any(|o| o.name == *name))
        {
            return Err(Error::UnknownArgument(name.clone()));
        }

        let mut argv = Vec::new();
        for option in &self.options {
            let Some((_, value)) = args.iter().rev().find(|(name, _)| *name == option.name) else {
                if option.default.is_none() {
                    return Err(Error::MissingArgument(option.name.clone()));
                }
                continue;
            };

            argv.push(format!("--{}", option.name));
            match (option.arity, value) {
                (Arity::One, Value::List(_)) => return Err(option.type_error()),
                (Arity::One, scalar) => argv.push(option.token(scalar)?),
                (Arity::OneOrMore, Value::List(items)) if !items.is_empty() => {
                    for item in items {
                        argv.push(option.token(item)?);
                    }
                }
                (Arity::OneOrMore, Value::List(_)) => return Err(option.type_error()),
                (Arity::OneOrMore, scalar) => argv.push(option.token(scalar)?),
            }
        }
        Ok(argv)
    }
}

impl OptionSpec {
    fn render(&self) -> String {
        let converter = match self.converter {
            ScalarType::Bool => "lambda v: v.lower() in ('1', 'true', 'yes')",
            other => other.name(),
        };
        let nargs = match self.arity {
            Arity::One => "",
            Arity::OneOrMore => ", nargs='+'",
        };
        let presence = match &self.default {
            Some(default) => format!("default={default}"),
            None => "required=True".to_owned(),
        };
        format!(
            "parser.add_argument('--{}', type={converter}{nargs}, {presence})",
            self.name
        )
    }

    fn token(&self, value: &Value) -> mason_core::Result<String> {
        match (self.converter, value) {
            (ScalarType::Bool, Value::Bool(b)) => Ok(b.to_string()),
            (ScalarType::Int, Value::Int(i)) => Ok(i.to_string()),
            (ScalarType::Float, Value::Float(f)) if f.is_finite() => Ok(f.to_string()),
            (ScalarType::Float, Value::Int(i)) => Ok(i.to_string()),
            (ScalarType::Str, Value::Str(s)) => Ok(s.clone()),
            _ => Err(self.type_error()),
        }
    }

    fn type_error(&self) -> Error {
        let expected = match self.arity {
            Arity::One => format!("a single {}", self.converter.name()),
            Arity::OneOrMore => format!("one or more {} values", self.converter.name()),
        };
        Error::ArgumentType {
            name: self.name.clone(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Param;
    use proptest::prelude::*;

    fn entry(params: Vec<Param>) -> Operation {
        Operation::declare("entrypoint", params, "pass").unwrap()
    }

    #[test]
    fn scalar_and_sequence_options() {
        let spec = ArgSpec::from_operation(&entry(vec![
            Param::scalar("count", ScalarType::Int),
            Param::sequence("tags", ScalarType::Str),
        ]))
        .unwrap();

        assert_eq!(spec.options.len(), 2);
        assert_eq!(spec.options[0].arity, Arity::One);
        assert_eq!(spec.options[0].converter, ScalarType::Int);
        assert_eq!(spec.options[1].arity, Arity::OneOrMore);
        assert_eq!(spec.options[1].converter, ScalarType::Str);

        assert_eq!(
            spec.render_bootstrap("main"),
            "if __name__ == '__main__':\n\
             \x20   import argparse\n\
             \x20   parser = argparse.ArgumentParser()\n\
             \x20   parser.add_argument('--count', type=int, required=True)\n\
             \x20   parser.add_argument('--tags', type=str, nargs='+', required=True)\n\
             \x20   kwargs = vars(parser.parse_args())\n\
             \x20   main(**kwargs)"
        );
    }

    #[test]
    fn zero_params_is_a_bare_call() {
        let spec = ArgSpec::from_operation(&entry(vec![])).unwrap();
        let bootstrap = spec.render_bootstrap("main");

        assert_eq!(bootstrap, "if __name__ == '__main__':\n    main()");
        assert!(!bootstrap.contains("argparse"));
    }

    #[test]
    fn defaults_make_options_optional() {
        let spec = ArgSpec::from_operation(&entry(vec![
            Param::scalar("rate", ScalarType::Float).with_default("0.5"),
        ]))
        .unwrap();

        assert!(
            spec.render_bootstrap("main")
                .contains("parser.add_argument('--rate', type=float, default=0.5)")
        );
    }

    #[test]
    fn bool_options_parse_text() {
        let spec =
            ArgSpec::from_operation(&entry(vec![Param::scalar("verbose", ScalarType::Bool)]))
                .unwrap();
        assert!(spec.render_bootstrap("main").contains(
            "parser.add_argument('--verbose', type=lambda v: v.lower() in ('1', 'true', 'yes'), required=True)"
        ));
    }

    #[test]
    fn missing_annotation_fails_fast() {
        let op = Operation::from_source("def f(self, a: int, b, c: dict):\n    pass\n").unwrap();
        let err = ArgSpec::from_operation(&op).unwrap_err();
        assert!(matches!(err, Error::MissingAnnotation { ref parameter, .. } if parameter == "b"));
    }

    #[test]
    fn unsupported_annotation_fails() {
        let op = Operation::from_source("def f(self, a: dict[str, int]):\n    pass\n").unwrap();
        let err = ArgSpec::from_operation(&op).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { ref parameter, .. } if parameter == "a"));
    }

    #[test]
    fn variadics_are_unsupported() {
        let op = Operation::from_source("def f(self, *args: int):\n    pass\n").unwrap();
        assert!(matches!(
            ArgSpec::from_operation(&op),
            Err(Error::UnsupportedType { .. })
        ));
    }

    #[test]
    fn keyword_only_marker_is_skipped() {
        let op = Operation::from_source("def f(self, *, a: int):\n    pass\n").unwrap();
        let spec = ArgSpec::from_operation(&op).unwrap();
        assert_eq!(spec.options.len(), 1);
    }

    #[test]
    fn invocation_renders_tokens() {
        let spec = ArgSpec::from_operation(&entry(vec![
            Param::scalar("count", ScalarType::Int),
            Param::sequence("tags", ScalarType::Str),
        ]))
        .unwrap();

        let argv = spec
            .invocation(&[
                ("tags".to_owned(), Value::from(vec!["a", "b", "c"])),
                ("count".to_owned(), Value::from(3)),
            ])
            .unwrap();

        assert_eq!(argv, vec!["--count", "3", "--tags", "a", "b", "c"]);
    }

    #[test]
    fn invocation_rejects_bad_arguments() {
        let spec = ArgSpec::from_operation(&entry(vec![
            Param::scalar("count", ScalarType::Int),
            Param::scalar("name", ScalarType::Str).with_default("'x'"),
        ]))
        .unwrap();

        assert!(matches!(
            spec.invocation(&[("nope".to_owned(), Value::from(1))]),
            Err(Error::UnknownArgument(_))
        ));
        assert!(matches!(
            spec.invocation(&[("count".to_owned(), Value::from("3"))]),
            Err(Error::ArgumentType { .. })
        ));
        assert!(matches!(
            spec.invocation(&[]),
            Err(Error::MissingArgument(ref n)) if n == "count"
        ));
        assert_eq!(
            spec.invocation(&[("count".to_owned(), Value::from(1))]).unwrap(),
            vec!["--count", "1"]
        );
    }

    proptest! {
        #[test]
        fn one_option_per_parameter(
            kinds in proptest::collection::vec((any::<bool>(), 0usize..4), 0..8)
        ) {
            let scalars = [ScalarType::Bool, ScalarType::Int, ScalarType::Float, ScalarType::Str];
            let params: Vec<Param> = kinds
                .iter()
                .enumerate()
                .map(|(i, (seq, ty))| {
                    if *seq {
                        Param::sequence(format!("p{i}"), scalars[*ty])
                    } else {
                        Param::scalar(format!("p{i}"), scalars[*ty])
                    }
                })
                .collect();

            let spec = ArgSpec::from_operation(&entry(params)).unwrap();
            let bootstrap = spec.render_bootstrap("main");

            prop_assert_eq!(spec.options.len(), kinds.len());
            prop_assert_eq!(bootstrap.matches("parser.add_argument(").count(), kinds.len());
            prop_assert_eq!(bootstrap.contains("ArgumentParser"), !kinds.is_empty());
        }
    }
}
