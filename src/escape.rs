/// Escape the four HTML-significant characters `&`, `<`, `>` and `"`.
///
/// Every other character passes through untouched.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

/// Append `text` to `out` with HTML escaping applied.
pub fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::escape;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_special_chars() {
        assert_eq!(escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn existing_entities_are_escaped_again() {
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn leaves_other_characters_alone() {
        assert_eq!(escape("it's *fine* ünïcödé"), "it's *fine* ünïcödé");
        assert_eq!(escape(""), "");
    }
}
