// src/document/escape.rs
// =============================================================================
// XML escaping.
//
// Besides the five markup characters we also handle:
// - '\r' is written as &#13;, because XML parsers turn a raw "\r\n" into "\n"
// - characters XML 1.0 forbids outright (NUL and the other C0 controls except
//   tab, newline and carriage return, plus U+FFFE and U+FFFF) are replaced by
//   U+FFFD. They aren't allowed even as &#N; references, so this is lossy.
// Every other text comes back from a parser exactly as it went in.
// =============================================================================

use std::borrow::Cow;

/// What forbidden characters turn into.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Escapes `text` for use in XML element content and attribute values.
/// Borrows the input when nothing needs escaping.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\r' => out.push_str("&#13;"),
            c if is_forbidden(c) => out.push(REPLACEMENT_CHAR),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Number of characters in `text` that `escape_xml` has to replace.
pub fn forbidden_chars(text: &str) -> usize {
    text.chars().filter(|&c| is_forbidden(c)).count()
}

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '"' | '\'' | '\r') || is_forbidden(c)
}

// Outside XML 1.0's Char production. Surrogates can't occur in a Rust str.
fn is_forbidden(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}')
        || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_xml("fn main() {}\n"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_markup_characters() {
        assert_eq!(
            escape_xml(r#"if a < b && c > "d" || 'e'"#),
            "if a &lt; b &amp;&amp; c &gt; &quot;d&quot; || &apos;e&apos;"
        );
    }

    #[test]
    fn test_already_escaped_text_is_escaped_again() {
        assert_eq!(escape_xml("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_carriage_return_is_a_reference() {
        assert_eq!(escape_xml("a\r\nb\tc"), "a&#13;\nb\tc");
    }

    #[test]
    fn test_forbidden_characters_are_replaced() {
        let text = "Write-Host \u{1b}[32mok\u{1b}[0m\u{c}\u{0}\u{ffff}";
        assert_eq!(
            escape_xml(text),
            "Write-Host \u{fffd}[32mok\u{fffd}[0m\u{fffd}\u{fffd}\u{fffd}"
        );
        assert_eq!(forbidden_chars(text), 5);
        assert!(!escape_xml(text).contains("&#"));
    }

    #[test]
    fn test_allowed_characters_are_kept() {
        // DEL, C1 controls and astral characters are legal XML 1.0
        let text = "\u{7f}\u{85}\u{fffd}\u{1f600}";
        assert!(matches!(escape_xml(text), Cow::Borrowed(_)));
        assert_eq!(forbidden_chars(text), 0);
    }
}
