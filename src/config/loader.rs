//! Configuration loader with TOML parsing and environment variable substitution

use super::schema::CafetchConfig;
use crate::domain::errors::CafetchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`CafetchConfig`]
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns a `Configuration` error if the file cannot be read, a referenced
/// variable is unset, parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use cafetch::config::loader::load_config;
///
/// let config = load_config("cafetch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CafetchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CafetchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CafetchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads the configuration file if it exists, defaults otherwise
///
/// `required` is set when the user named the file explicitly; a missing file
/// is then an error instead of silently falling back to defaults.
pub fn load_config_or_default(path: impl AsRef<Path>, required: bool) -> Result<CafetchConfig> {
    let path = path.as_ref();
    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        return Ok(CafetchConfig::default());
    }
    load_config(path)
}

/// Parse and validate TOML text
pub fn parse_config(contents: &str) -> Result<CafetchConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: CafetchConfig = toml::from_str(&contents)
        .map_err(|e| CafetchError::Configuration(format!("Failed to parse TOML: {e}")))?;

    config.validate().map_err(|e| {
        CafetchError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied unchanged. Values placed inside a `"..."` string
/// are escaped so quotes and backslashes survive parsing.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CafetchError::Other(format!("invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed_line = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let start = cap.get(0).map_or(0, |m| m.start());
                    if in_basic_string(&line[..start]) {
                        escape_basic_string(&value)
                    } else {
                        value
                    }
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    cap[0].to_string()
                }
            }
        });
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CafetchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Whether the end of `prefix` lies inside an open TOML basic string
fn in_basic_string(prefix: &str) -> bool {
    let mut in_basic = false;
    let mut in_literal = false;
    let mut escaped = false;
    for c in prefix.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_basic => escaped = true,
            '"' if !in_literal => in_basic = !in_basic,
            '\'' if !in_basic => in_literal = !in_literal,
            _ => {}
        }
    }
    in_basic
}

/// Escape a value for a TOML basic string
fn escape_basic_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}
