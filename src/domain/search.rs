//! Search-term escaping for literal substring matching.

/// Characters that carry meaning inside a regular expression pattern.
const METACHARACTERS: &[char] = &[
    '-', '[', ']', '{', '}', '(', ')', '*', '+', '?', '.', ',', '\\', '^', '$', '|', '#',
];

/// Escape a raw search term so that it matches only literally.
///
/// Every metacharacter and every whitespace character is prefixed with a
/// backslash; the result is usable as a case-insensitive substring pattern
/// against the post title and description columns.
pub fn escape_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() * 2);
    for ch in term.chars() {
        if ch.is_whitespace() || METACHARACTERS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_pattern;

    #[test]
    fn plain_terms_pass_through() {
        assert_eq!(escape_pattern("rust"), "rust");
        assert_eq!(escape_pattern("Ferris2026"), "Ferris2026");
    }

    #[test]
    fn quantifiers_become_literal() {
        assert_eq!(escape_pattern("C++"), "C\\+\\+");
        assert_eq!(escape_pattern("what?"), "what\\?");
        assert_eq!(escape_pattern("a*b"), "a\\*b");
    }

    #[test]
    fn every_metacharacter_is_escaped() {
        let input = "-[]{}()*+?.,\\^$|#";
        let escaped = escape_pattern(input);
        let mut chars = escaped.chars();
        for original in input.chars() {
            assert_eq!(chars.next(), Some('\\'));
            assert_eq!(chars.next(), Some(original));
        }
        assert_eq!(chars.next(), None);
    }

    #[test]
    fn whitespace_is_escaped() {
        assert_eq!(escape_pattern("two words"), "two\\ words");
        assert_eq!(escape_pattern("tab\there"), "tab\\\there");
    }
}
