//! Platform identifiers derived from a token path.
//!
//! The path is the full dot-separated token path, e.g.
//! `legal.copyright.neutral.lang--neut--title--copyright`:
//!
//! - WEB:     `var(--legal-copyright-neutral-lang--neut--title--copyright)`
//! - ANDROID: `legal_copyright_neutral_lang__neut__title__copyright`
//! - iOS:     `legalCopyrightNeutralLangNeutTitleCopyright`

use crate::models::CodeSyntax;

/// CSS custom property reference: dots become hyphens.
pub fn web_syntax(path: &str) -> String {
    format!("var(--{})", path.replace('.', "-"))
}

/// Android resource name: dots and hyphens become underscores.
pub fn android_syntax(path: &str) -> String {
    path.replace(['.', '-'], "_")
}

/// iOS camelCase identifier.
///
/// Splits on dots and hyphens; the first segment is kept as-is and every
/// later segment has its first character upper-cased. Empty segments from
/// separator runs contribute nothing.
pub fn ios_syntax(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for (i, part) in path.split(['.', '-']).enumerate() {
        if i == 0 {
            out.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// All three identifiers for a path.
pub fn code_syntax(path: &str) -> CodeSyntax {
    CodeSyntax {
        web: web_syntax(path),
        android: android_syntax(path),
        ios: ios_syntax(path),
    }
}
