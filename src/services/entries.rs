//! Resolution of raw entry names into `(domain, name, title)` triples.

use std::fs;
use std::path::Path;

use crate::error::{TokenError, TokenResult};

/// A content entry ready for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Dot-separated domain.
    pub domain: String,
    /// Entry name (token-key safe).
    pub name: String,
    /// Human-readable title handed to the generator.
    pub neutral_title: String,
}

impl ResolvedEntry {
    /// `domain.name`
    pub fn path(&self) -> String {
        format!("{}.{}", self.domain, self.name)
    }
}

/// Resolves one raw name.
///
/// - `"nav.Dashboard"` → domain `nav`, name `dashboard`, title `Dashboard`
/// - `"Privacy Policy"` with default domain `legal` → name `privacy-policy`
///
/// Without a dot and without a default domain the name cannot be placed.
pub fn resolve_entry(raw: &str, default_domain: Option<&str>) -> TokenResult<ResolvedEntry> {
    let trimmed = raw.trim();

    if let Some((domain, last)) = trimmed.rsplit_once('.') {
        let title = last.trim();
        return Ok(ResolvedEntry {
            domain: domain.to_string(),
            name: title.to_lowercase(),
            neutral_title: title.to_string(),
        });
    }

    match default_domain {
        Some(domain) => Ok(ResolvedEntry {
            domain: domain.to_string(),
            name: trimmed
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-"),
            neutral_title: trimmed.to_string(),
        }),
        None => Err(TokenError::InvalidEntry(format!(
            "Cannot resolve \"{trimmed}\" without a domain. Use --domain or dot notation (e.g., \"nav.{}\")",
            trimmed.to_lowercase()
        ))),
    }
}

/// Splits comma-separated arguments into individual names.
pub fn expand_names<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads names from a file, one per line, skipping blank lines.
pub fn read_names_file(path: &Path) -> TokenResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| TokenError::io(path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_dot_notation() {
        let entry = resolve_entry("  nav.Dashboard ", None).unwrap();
        assert_eq!(entry.domain, "nav");
        assert_eq!(entry.name, "dashboard");
        assert_eq!(entry.neutral_title, "Dashboard");
        assert_eq!(entry.path(), "nav.dashboard");
    }

    #[test]
    fn test_resolve_multi_segment_domain() {
        let entry = resolve_entry("legal.copyright.Notice", Some("ignored")).unwrap();
        assert_eq!(entry.domain, "legal.copyright");
        assert_eq!(entry.name, "notice");
    }

    #[test]
    fn test_resolve_with_default_domain() {
        let entry = resolve_entry("Privacy   Policy", Some("legal")).unwrap();
        assert_eq!(entry.domain, "legal");
        assert_eq!(entry.name, "privacy-policy");
        assert_eq!(entry.neutral_title, "Privacy   Policy");
    }

    #[test]
    fn test_resolve_without_domain_fails() {
        let err = resolve_entry("Settings", None).unwrap_err();
        assert!(err.to_string().contains("nav.settings"));
    }

    #[test]
    fn test_expand_names() {
        let names = expand_names(&["Dashboard, Settings,", " Profile "]);
        assert_eq!(names, vec!["Dashboard", "Settings", "Profile"]);
    }

    #[test]
    fn test_read_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("words.txt");
        fs::write(&path, "nav.home\n\n  nav.settings  \n").unwrap();
        assert_eq!(
            read_names_file(&path).unwrap(),
            vec!["nav.home", "nav.settings"]
        );
    }
}
