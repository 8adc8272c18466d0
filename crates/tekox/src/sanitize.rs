//! Helpers for keeping mailbox identities out of logs and span fields.

use std::path::Path;

/// Masks the local part of an email address, keeping its first character
/// and the domain.
///
/// - `alice@example.com` → `a***@example.com`
/// - `not-an-address` → `***`
pub fn redact_address(address: &str) -> String {
    match address.trim().split_once('@') {
        Some((local, domain)) if !domain.is_empty() => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Returns only the filename component of a path (no directory).
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}
