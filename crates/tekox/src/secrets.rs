//! Password lookup for front ends that do not want to prompt.
//!
//! The password may come from a file (Docker secrets style) or an environment
//! variable. Nothing is ever written back; when neither source is set the
//! caller falls back to asking the user.

use secrecy::SecretString;
use std::fs;

/// Environment variable holding the password itself.
pub const PASSWORD_ENV_VAR: &str = "TEKOX_PASSWORD";

/// Environment variable holding a path to a file containing the password.
pub const PASSWORD_FILE_ENV_VAR: &str = "TEKOX_PASSWORD_FILE";

#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Failed to read secret from file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment variable '{name}' contains invalid UTF-8")]
    EnvVarNotUnicode { name: String },
}

pub type Result<T> = std::result::Result<T, SecretError>;

/// Resolves the password from [`PASSWORD_FILE_ENV_VAR`], then
/// [`PASSWORD_ENV_VAR`].
pub fn resolve_password() -> Result<Option<SecretString>> {
    let file_path = std::env::var(PASSWORD_FILE_ENV_VAR).ok();
    resolve_secret(file_path.as_deref(), Some(PASSWORD_ENV_VAR))
}

/// Resolves a secret from a file, falling back to an environment variable.
///
/// Empty sources are skipped. Returns `Ok(None)` when no source yields a
/// value, and an error only when a configured source exists but is unusable.
pub fn resolve_secret(file_path: Option<&str>, env_var: Option<&str>) -> Result<Option<SecretString>> {
    if let Some(path) = file_path.filter(|p| !p.is_empty()) {
        let expanded = expand_home(path);
        let content = fs::read_to_string(&expanded).map_err(|e| SecretError::FileReadError {
            path: expanded.clone(),
            source: e,
        })?;
        let trimmed = content.trim();
        if !trimmed.is_empty() {
            return Ok(Some(SecretString::from(trimmed)));
        }
    }

    if let Some(name) = env_var.filter(|n| !n.is_empty()) {
        match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => {
                return Ok(Some(SecretString::from(value.trim())));
            }
            Ok(_) | Err(std::env::VarError::NotPresent) => {}
            Err(std::env::VarError::NotUnicode(_)) => {
                return Err(SecretError::EnvVarNotUnicode {
                    name: name.to_string(),
                })
            }
        }
    }

    Ok(None)
}

/// Expands a leading `~` to the user's home directory (`~user` is not supported).
fn expand_home(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
            if path == "~" {
                return home.to_string_lossy().into_owned();
            }
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
