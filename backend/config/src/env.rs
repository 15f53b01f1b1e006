//! Environment variable substitution for config values.
//!
//! Supports `${VAR_NAME}` syntax in string values, resolved at load time.
//! Only uppercase `[A-Z_][A-Z0-9_]*` variable names are matched.
//! `$${VAR}` escapes to a literal `${VAR}`.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// A reference, optionally preceded by the `$` escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Only string leaves are processed. Unset or empty variables are an error.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    substitute_value(value, &std::env::vars().collect(), "")
}

/// Substitute env vars using a provided map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => {
            let result: Result<Vec<_>> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(result?))
        }
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for caps in ENV_VAR_PATTERN.captures_iter(s) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let name = &caps[2];
        out.push_str(&s[last..whole.start]);
        if !caps[1].is_empty() {
            out.push_str("${");
            out.push_str(name);
            out.push('}');
        } else {
            match env.get(name).filter(|v| !v.is_empty()) {
                Some(v) => out.push_str(v),
                None => {
                    return Err(MissingEnvVarError {
                        var_name: name.to_string(),
                        config_path: path.to_string(),
                    }
                    .into())
                }
            }
        }
        last = whole.end;
    }
    out.push_str(&s[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_nested_strings() {
        let value = json!({
            "audio": { "assetPath": "${HOME_DIR}/music/lofi.mp3", "fadeMs": 450 },
            "ending": { "profileUrl": "https://instagram.com/${HANDLE}" }
        });
        let out =
            resolve_env_vars_with(&value, &env(&[("HOME_DIR", "/home/alya"), ("HANDLE", "harimu")]))
                .unwrap();
        assert_eq!(out["audio"]["assetPath"], "/home/alya/music/lofi.mp3");
        assert_eq!(out["audio"]["fadeMs"], 450);
        assert_eq!(out["ending"]["profileUrl"], "https://instagram.com/harimu");
    }

    #[test]
    fn missing_var_reports_path() {
        let value = json!({ "ending": { "profileUrl": "${NOPE}" } });
        let err = resolve_env_vars_with(&value, &HashMap::new()).unwrap_err();
        let missing = err.downcast_ref::<MissingEnvVarError>().unwrap();
        assert_eq!(missing.var_name, "NOPE");
        assert_eq!(missing.config_path, "ending.profileUrl");
    }

    #[test]
    fn empty_var_counts_as_missing() {
        let value = json!(["${EMPTY}"]);
        assert!(resolve_env_vars_with(&value, &env(&[("EMPTY", "")])).is_err());
    }

    #[test]
    fn escaped_reference_stays_literal() {
        let value = json!("cost $${PRICE} for ${WHO}");
        let out = resolve_env_vars_with(&value, &env(&[("WHO", "you")])).unwrap();
        assert_eq!(out, "cost ${PRICE} for you");
    }

    #[test]
    fn lowercase_names_are_left_alone() {
        let value = json!("${lower}");
        let out = resolve_env_vars_with(&value, &HashMap::new()).unwrap();
        assert_eq!(out, "${lower}");
    }
}
