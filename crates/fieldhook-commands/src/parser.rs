//! Slash-command grammar
//!
//! `/command key=value key2="quoted value"` — the command token is word
//! characters after the slash, arguments are space-separated `key=value`
//! pairs. Quoted values may contain spaces; unquoted values may not. There
//! are no escapes inside quotes.

use crate::registry::{ArgType, CommandRegistry, CommandSpec};
use crate::suggest::suggestions;
use crate::workflow::WorkflowRegistry;
use chrono::{DateTime, Utc};
use fieldhook_core::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// A validated command invocation.
#[derive(Clone, Debug, Serialize)]
pub struct Invocation {
    pub command: String,
    pub agent: String,
    pub arguments: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
    pub invocation_id: String,
}

/// Parse and validate a slash-command line against the registry.
pub fn parse(registry: &CommandRegistry, input: &str) -> Result<Invocation> {
    let input = input.trim();
    let rest = input
        .strip_prefix('/')
        .ok_or_else(|| Error::parse("command must start with '/'"))?;

    let name_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return Err(Error::parse("empty command name"));
    }
    let (name, tail) = rest.split_at(name_len);

    let spec = registry.get(name).ok_or_else(|| Error::UnknownCommand {
        input: name.to_string(),
        suggestions: suggestions(&registry.names(), name),
    })?;

    let arguments = parse_args(tail)?;
    validate(spec, &arguments)?;

    Ok(Invocation {
        command: spec.name.clone(),
        agent: spec.agent.clone(),
        arguments,
        timestamp: Utc::now(),
        invocation_id: uuid::Uuid::new_v4().to_string(),
    })
}

/// Tokenize the `key=value` tail. Single linear scan.
fn parse_args(tail: &str) -> Result<BTreeMap<String, String>> {
    let mut args = BTreeMap::new();
    let mut chars = tail.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        // key
        let mut key_end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                key_end = i + c.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let key = &tail[start..key_end];
        if key.is_empty() {
            return Err(Error::parse(format!(
                "unexpected character at offset {}",
                start
            )));
        }

        match chars.next() {
            Some((_, '=')) => {}
            _ => return Err(Error::parse(format!("expected '=' after '{}'", key))),
        }

        // value: quoted or bare
        let value = match chars.peek() {
            Some(&(open, '"')) => {
                chars.next();
                let vstart = open + 1;
                let mut vend = None;
                for (i, c) in chars.by_ref() {
                    if c == '"' {
                        vend = Some(i);
                        break;
                    }
                }
                let vend =
                    vend.ok_or_else(|| Error::parse(format!("unterminated quote for '{}'", key)))?;
                tail[vstart..vend].to_string()
            }
            _ => {
                let vstart = chars.peek().map(|&(i, _)| i).unwrap_or(tail.len());
                let mut vend = vstart;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    vend = i + c.len_utf8();
                    chars.next();
                }
                tail[vstart..vend].to_string()
            }
        };

        args.insert(key.to_string(), value);
    }

    Ok(args)
}

/// Check required arguments and per-type shape.
fn validate(spec: &CommandSpec, args: &BTreeMap<String, String>) -> Result<()> {
    let missing: Vec<String> = spec
        .required_args()
        .into_iter()
        .filter(|name| !args.contains_key(*name))
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(Error::MissingArgs {
            command: spec.name.clone(),
            missing,
            help: spec.help(),
        });
    }

    for (name, value) in args {
        let Some(arg_spec) = spec.args.get(name) else {
            // Unknown arguments pass through; the schema only constrains
            // declared ones.
            continue;
        };
        match arg_spec.ty {
            ArgType::Number => {
                value
                    .parse::<f64>()
                    .map_err(|_| Error::invalid_arg(name, "expected a number"))?;
            }
            ArgType::Bool => {
                if value != "true" && value != "false" {
                    return Err(Error::invalid_arg(name, "expected true or false"));
                }
            }
            ArgType::File => {
                if !value.starts_with('@') {
                    return Err(Error::invalid_arg(name, "file references start with '@'"));
                }
            }
            ArgType::Workflow => {
                let workflows = WorkflowRegistry::shared();
                if workflows.get(value).is_none() {
                    return Err(Error::invalid_arg(
                        name,
                        format!("unknown workflow (known: {})", workflows.names().join(", ")),
                    ));
                }
            }
            ArgType::String | ArgType::Array => {}
        }
    }

    Ok(())
}

/// Split a validated `Array` argument into its items.
pub fn split_array(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Render a command line from a name and arguments. Values containing
/// whitespace are quoted; `parse(render(..))` binds the same arguments.
pub fn render_command(command: &str, args: &BTreeMap<String, String>) -> String {
    let mut out = format!("/{}", command);
    for (key, value) in args {
        if value.chars().any(char::is_whitespace) || value.is_empty() {
            out.push_str(&format!(" {}=\"{}\"", key, value));
        } else {
            out.push_str(&format!(" {}={}", key, value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg() -> CommandRegistry {
        CommandRegistry::builtin()
    }

    #[test]
    fn quoted_values_keep_spaces() {
        let inv = parse(&reg(), r#"/alignment Q="test for prompt injection""#).unwrap();
        assert_eq!(inv.command, "alignment");
        assert_eq!(inv.arguments["Q"], "test for prompt injection");
    }

    #[test]
    fn bare_values_stop_at_whitespace() {
        let inv = parse(&reg(), "/research topic=codegen sources=3").unwrap();
        assert_eq!(inv.arguments["topic"], "codegen");
        assert_eq!(inv.arguments["sources"], "3");
    }

    #[test]
    fn missing_required_argument_is_named() {
        let err = parse(&reg(), "/aio").unwrap_err();
        match err {
            Error::MissingArgs { command, missing, help } => {
                assert_eq!(command, "aio");
                assert_eq!(missing, vec!["Q"]);
                assert!(help.contains("/aio"));
            }
            other => panic!("expected MissingArgs, got {:?}", other),
        }
    }

    #[test]
    fn number_type_is_checked() {
        let err = parse(&reg(), r#"/alignment Q="x" depth=deep"#).unwrap_err();
        assert!(matches!(err, Error::InvalidArg { .. }));
        parse(&reg(), r#"/alignment Q="x" depth=3"#).unwrap();
    }

    #[test]
    fn bool_and_file_types_are_checked() {
        let err = parse(&reg(), "/lint fix=yes").unwrap_err();
        assert!(matches!(err, Error::InvalidArg { .. }));
        parse(&reg(), "/lint fix=true").unwrap();

        let err = parse(&reg(), r#"/doc path=src/lib.rs"#).unwrap_err();
        assert!(matches!(err, Error::InvalidArg { .. }));
        parse(&reg(), "/doc path=@src/lib.rs").unwrap();
    }

    #[test]
    fn workflow_argument_must_name_a_registered_workflow() {
        let inv = parse(&reg(), "/chain workflow=full_development_cycle").unwrap();
        assert_eq!(inv.arguments["workflow"], "full_development_cycle");

        let err = parse(&reg(), "/chain workflow=no_such_workflow").unwrap_err();
        match err {
            Error::InvalidArg { name, reason } => {
                assert_eq!(name, "workflow");
                assert!(reason.contains("full_development_cycle"));
            }
            other => panic!("expected InvalidArg, got {:?}", other),
        }
    }

    #[test]
    fn unterminated_quote_is_a_parse_error() {
        let err = parse(&reg(), r#"/aio Q="oops"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn array_split_trims_and_drops_empty() {
        assert_eq!(split_array("a, b,,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn render_parse_round_trip() {
        let mut args = BTreeMap::new();
        args.insert("Q".to_string(), "test for prompt injection".to_string());
        args.insert("model".to_string(), "sonnet".to_string());
        let line = render_command("alignment", &args);
        let inv = parse(&reg(), &line).unwrap();
        assert_eq!(inv.command, "alignment");
        assert_eq!(inv.arguments, args);
    }
}
