//! Link canonicalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Base URL that bare article titles are expanded against.
pub const WIKIPEDIA_BASE: &str = "https://en.wikipedia.org/wiki/";

/// The empty-link value: an explicit "deliberately not linkable" decision,
/// distinct from "not yet annotated".
pub const EMPTY_LINK: &str = "";

static URL_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://").expect("valid regex"));

/// Canonicalize user-entered link text.
///
/// A dash or empty input becomes the empty-link sentinel. Anything that
/// already carries a URL scheme passes through unchanged. Everything else is
/// taken to be an encyclopedia article title: spaces become underscores and
/// the Wikipedia base URL is prefixed. Idempotent:
/// `normalize_link(normalize_link(x)) == normalize_link(x)`.
pub fn normalize_link(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return EMPTY_LINK.to_string();
    }
    if URL_SCHEME.is_match(trimmed) {
        return trimmed.to_string();
    }
    format!("{}{}", WIKIPEDIA_BASE, trimmed.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_is_sentinel() {
        assert_eq!(normalize_link("-"), EMPTY_LINK);
        assert_eq!(normalize_link(""), EMPTY_LINK);
        assert_eq!(normalize_link("  "), EMPTY_LINK);
    }

    #[test]
    fn test_bare_title_expands() {
        assert_eq!(
            normalize_link("Jim Lehrer"),
            "https://en.wikipedia.org/wiki/Jim_Lehrer"
        );
        assert_eq!(
            normalize_link("Jim_Lehrer"),
            "https://en.wikipedia.org/wiki/Jim_Lehrer"
        );
    }

    #[test]
    fn test_full_url_passes_through() {
        let url = "https://en.wikipedia.org/wiki/Jim_Lehrer";
        assert_eq!(normalize_link(url), url);

        let other = "http://example.org/page?q=1";
        assert_eq!(normalize_link(other), other);
    }

    #[test]
    fn test_idempotent() {
        for input in ["-", "", "Jim Lehrer", "https://en.wikipedia.org/wiki/Jim_Lehrer"] {
            let once = normalize_link(input);
            assert_eq!(normalize_link(&once), once, "not idempotent for {:?}", input);
        }
    }
}
