//! Alias hints for newly registered assets.

use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("Valid punctuation regex"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("Valid separator regex"));

/// Lowercase `value`, drop punctuation and collapse whitespace/hyphen runs to `-`.
///
/// # Examples
///
/// ```
/// assert_eq!(podium_core::slugify("  Ada Lovelace, PhD "), "ada-lovelace-phd");
/// ```
pub fn slugify(value: &str) -> String {
    let stripped = NON_WORD.replace_all(value, "");
    let lowered = stripped.trim().to_lowercase();
    SEPARATORS.replace_all(&lowered, "-").into_owned()
}

/// Alias hint for a speaker's image: `{slug(name)}-{uuid4}`.
pub fn alias_hint(name: &str) -> String {
    format!("{}-{}", slugify(name), Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slugify("Grace  --  Hopper"), "grace-hopper");
        assert_eq!(slugify("José María"), "josé-maría");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn alias_hint_is_unique_per_call() {
        let a = alias_hint("Ada Lovelace");
        let b = alias_hint("Ada Lovelace");
        assert!(a.starts_with("ada-lovelace-"));
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a["ada-lovelace-".len()..]).is_ok());
    }
}
