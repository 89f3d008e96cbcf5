//! Declared-option parsing
//!
//! Matches the option declarations from a command's metadata against the
//! residual command-line tokens. Unrecognized tokens are not an error: they
//! stay in the residual list and are passed through to the script verbatim.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{OptionDecl, OptionKind};

#[derive(Debug, Error, PartialEq)]
pub enum OptionError {
    #[error("option '--{name}' requires a value")]
    MissingValue { name: String },

    #[error("option '--{name}' expects a number, got '{value}'")]
    InvalidValue { name: String, value: String },

    #[error("required option '--{name}' was not supplied")]
    MissingOption { name: String },
}

/// Parsed option values plus the tokens left for the script
#[derive(Debug, Default, PartialEq)]
pub struct ParsedOptions {
    /// Option name to supplied (or defaulted) value
    pub values: BTreeMap<String, String>,

    /// Tokens not consumed as options, in original order
    pub residual: Vec<String>,
}

/// Parses declared options out of the residual tokens
///
/// Supports `--name value`, `--name=value`, `-s value`, and bare `--flag`
/// for booleans. Everything after a literal `--` is residual. Defaults are
/// applied for absent options; a missing `required` option is an error.
pub fn parse_options(decls: &[OptionDecl], tokens: &[String]) -> Result<ParsedOptions, OptionError> {
    let mut parsed = ParsedOptions::default();
    let mut iter = tokens.iter();
    let mut passthrough = false;

    while let Some(token) = iter.next() {
        if passthrough {
            parsed.residual.push(token.clone());
            continue;
        }
        if token == "--" {
            passthrough = true;
            continue;
        }

        let Some((decl, inline)) = match_decl(decls, token) else {
            parsed.residual.push(token.clone());
            continue;
        };

        let value = match inline {
            Some(value) => value.to_string(),
            None if decl.kind == OptionKind::Boolean => "true".to_string(),
            None => iter
                .next()
                .cloned()
                .ok_or_else(|| OptionError::MissingValue {
                    name: decl.name.clone(),
                })?,
        };

        if decl.kind == OptionKind::Number && value.parse::<f64>().is_err() {
            return Err(OptionError::InvalidValue {
                name: decl.name.clone(),
                value,
            });
        }

        parsed.values.insert(decl.name.clone(), value);
    }

    for decl in decls {
        if parsed.values.contains_key(&decl.name) {
            continue;
        }
        if let Some(default) = &decl.default {
            parsed.values.insert(decl.name.clone(), default_to_string(default));
        } else if decl.required {
            return Err(OptionError::MissingOption {
                name: decl.name.clone(),
            });
        }
    }

    Ok(parsed)
}

fn match_decl<'a>(decls: &'a [OptionDecl], token: &'a str) -> Option<(&'a OptionDecl, Option<&'a str>)> {
    if let Some(rest) = token.strip_prefix("--") {
        let (name, inline) = match rest.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (rest, None),
        };
        decls.iter().find(|d| d.name == name).map(|d| (d, inline))
    } else if let Some(rest) = token.strip_prefix('-') {
        let mut chars = rest.chars();
        let short = chars.next()?;
        if chars.next().is_some() {
            // Bundled or multi-character shorts are not option syntax here;
            // leave them for the script.
            return None;
        }
        decls
            .iter()
            .find(|d| d.short == Some(short))
            .map(|d| (d, None))
    } else {
        None
    }
}

fn default_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, short: Option<char>, kind: OptionKind) -> OptionDecl {
        OptionDecl {
            name: name.to_string(),
            short,
            kind,
            description: None,
            suggestions: Vec::new(),
            required: false,
            default: None,
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn long_option_takes_next_token() {
        let decls = [decl("env", None, OptionKind::String)];
        let parsed = parse_options(&decls, &tokens(&["--env", "prod"])).unwrap();
        assert_eq!(parsed.values["env"], "prod");
        assert!(parsed.residual.is_empty());
    }

    #[test]
    fn inline_and_short_forms() {
        let decls = [
            decl("env", Some('e'), OptionKind::String),
            decl("count", None, OptionKind::Number),
        ];
        let parsed =
            parse_options(&decls, &tokens(&["--count=3", "-e", "staging", "leftover"])).unwrap();
        assert_eq!(parsed.values["count"], "3");
        assert_eq!(parsed.values["env"], "staging");
        assert_eq!(parsed.residual, tokens(&["leftover"]));
    }

    #[test]
    fn boolean_flag_needs_no_value() {
        let decls = [decl("force", None, OptionKind::Boolean)];
        let parsed = parse_options(&decls, &tokens(&["--force", "target"])).unwrap();
        assert_eq!(parsed.values["force"], "true");
        assert_eq!(parsed.residual, tokens(&["target"]));
    }

    #[test]
    fn unknown_flags_stay_residual() {
        let decls = [decl("env", None, OptionKind::String)];
        let parsed = parse_options(&decls, &tokens(&["--unknown", "--env", "prod"])).unwrap();
        assert_eq!(parsed.residual, tokens(&["--unknown"]));
        assert_eq!(parsed.values["env"], "prod");
    }

    #[test]
    fn double_dash_stops_option_parsing() {
        let decls = [decl("env", None, OptionKind::String)];
        let parsed = parse_options(&decls, &tokens(&["--", "--env", "prod"])).unwrap();
        assert!(parsed.values.is_empty());
        assert_eq!(parsed.residual, tokens(&["--env", "prod"]));
    }

    #[test]
    fn number_values_are_validated() {
        let decls = [decl("count", None, OptionKind::Number)];
        let err = parse_options(&decls, &tokens(&["--count", "many"])).unwrap_err();
        assert_eq!(
            err,
            OptionError::InvalidValue {
                name: "count".to_string(),
                value: "many".to_string()
            }
        );
    }

    #[test]
    fn missing_value_is_an_error() {
        let decls = [decl("env", None, OptionKind::String)];
        let err = parse_options(&decls, &tokens(&["--env"])).unwrap_err();
        assert_eq!(err, OptionError::MissingValue { name: "env".to_string() });
    }

    #[test]
    fn defaults_and_required() {
        let mut with_default = decl("env", None, OptionKind::String);
        with_default.default = Some(serde_json::json!("dev"));
        let mut required = decl("region", None, OptionKind::String);
        required.required = true;

        let parsed = parse_options(
            &[with_default.clone(), required.clone()],
            &tokens(&["--region", "eu-west-1"]),
        )
        .unwrap();
        assert_eq!(parsed.values["env"], "dev");
        assert_eq!(parsed.values["region"], "eu-west-1");

        let err = parse_options(&[with_default, required], &tokens(&[])).unwrap_err();
        assert_eq!(err, OptionError::MissingOption { name: "region".to_string() });
    }

    #[test]
    fn non_string_defaults_are_stringified() {
        let mut count = decl("count", None, OptionKind::Number);
        count.default = Some(serde_json::json!(5));
        let parsed = parse_options(&[count], &tokens(&[])).unwrap();
        assert_eq!(parsed.values["count"], "5");
    }
}
