//! Custom validation functions for CLI arguments

use std::fs;
use std::path::PathBuf;

use crate::convert::TypeConverter;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("File does not exist: '{path_str}'"));
    }

    if !path.is_file() {
        return Err(format!("Path is not a file: '{path_str}'"));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read file '{path_str}': {e}")),
    }
}

/// Validate a key prefix, e.g. `APP_`
pub fn validate_prefix(prefix_str: &str) -> Result<String, String> {
    if prefix_str.chars().any(|c| c.is_whitespace() || c == '=') {
        return Err(format!(
            "Prefix cannot contain whitespace or '=', got: '{prefix_str}'"
        ));
    }
    Ok(prefix_str.to_string())
}

/// Validate an environment variable name
pub fn validate_key(key_str: &str) -> Result<String, String> {
    if key_str.is_empty() {
        return Err("Variable name cannot be empty".to_string());
    }
    validate_prefix(key_str)
}

/// Parse a converter name such as `Integer` or `Array<Boolean>`
pub fn parse_converter(name: &str) -> Result<TypeConverter, String> {
    name.parse().map_err(|e: crate::convert::ConversionError| e.to_string())
}
