//! Identifier quoting.

use std::borrow::Cow;

use crate::lexer::Keyword;

/// Wraps an identifier in double quotes, doubling any embedded `"`.
///
/// A string that already starts and ends with `"` is taken to be quoted and
/// returned unchanged. This is a formatting helper for trusted schema names,
/// not an escaping routine for untrusted input.
///
/// ```
/// use ddlparse_core::quote;
///
/// assert_eq!(quote("people"), "\"people\"");
/// assert_eq!(quote("a\"b"), "\"a\"\"b\"");
/// assert_eq!(quote("\"a\""), "\"a\"");
/// ```
#[must_use]
pub fn quote(identifier: &str) -> String {
    if identifier.len() >= 2 && identifier.starts_with('"') && identifier.ends_with('"') {
        return String::from(identifier);
    }
    let mut quoted = String::with_capacity(identifier.len() + 2);
    quoted.push('"');
    for c in identifier.chars() {
        if c == '"' {
            quoted.push('"');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Returns whether `name` lexes back as a single identifier when written
/// without quotes.
pub(crate) fn is_bare_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && Keyword::from_str(name).is_none()
}

/// Writes `name` as is when it is a bare name, quoted otherwise.
pub(crate) fn quote_if_needed(name: &str) -> Cow<'_, str> {
    if is_bare_name(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(quote(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("name"), "\"name\"");
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("order"), "\"order\"");
    }

    #[test]
    fn test_quote_doubles_embedded_quotes() {
        assert_eq!(quote("a\"b"), "\"a\"\"b\"");
        assert_eq!(quote("\"a"), "\"\"\"a\"");
    }

    #[test]
    fn test_quote_leaves_quoted_alone() {
        assert_eq!(quote("\"a\""), "\"a\"");
        assert_eq!(quote(&quote("x")), quote("x"));
    }

    #[test]
    fn test_lone_quote_is_escaped() {
        assert_eq!(quote("\""), "\"\"\"\"");
    }

    #[test]
    fn test_bare_names() {
        assert!(is_bare_name("count"));
        assert!(is_bare_name("_x9"));
        assert!(!is_bare_name(""));
        assert!(!is_bare_name("9x"));
        assert!(!is_bare_name("my func"));
        assert!(!is_bare_name("my-type"));
        assert!(!is_bare_name("select"));
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("integer"), "integer");
        assert_eq!(quote_if_needed("my func"), "\"my func\"");
        assert_eq!(quote_if_needed("Table"), "\"Table\"");
    }
}
