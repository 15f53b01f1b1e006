//! Visitor-name scrubbing.
//!
//! The name typed on the landing screen is the only personal data in a
//! session; it never reaches the log files verbatim.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

pub const VISITOR_PLACEHOLDER: &str = "[VISITOR]";

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Replaces case-insensitive occurrences of `name` in `input` with `[VISITOR]`.
///
/// Runs of whitespace inside the name match any whitespace run. A blank name
/// leaves the input untouched.
pub fn redact_name(input: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return input.to_string();
    }
    let pattern = WHITESPACE_RE
        .split(name)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.replace_all(input, VISITOR_PLACEHOLDER).into_owned(),
        Err(_) => input.replace(name, VISITOR_PLACEHOLDER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let clean = redact_name("Hai Alya! alya is here, ALYA.", "Alya");
        assert_eq!(clean, "Hai [VISITOR]! [VISITOR] is here, [VISITOR].");
    }

    #[test]
    fn escapes_regex_metacharacters() {
        let clean = redact_name("Hai a.b+c!", "a.b+c");
        assert_eq!(clean, "Hai [VISITOR]!");
        assert_eq!(redact_name("Hai axb!", "a.b"), "Hai axb!");
    }

    #[test]
    fn multi_word_names() {
        assert_eq!(redact_name("Hai Nur  Aini!", "nur aini"), "Hai [VISITOR]!");
    }

    #[test]
    fn blank_name_is_noop() {
        assert_eq!(redact_name("nothing here", "   "), "nothing here");
    }
}
