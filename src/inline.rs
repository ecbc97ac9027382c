use std::sync::LazyLock;

use regex::Regex;

use crate::escape::{escape, escape_into};

static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^`([^`]+)`").unwrap());

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)").unwrap());

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]\(([^)]+)\)").unwrap());

static AUTOLINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://[^\s<]+").unwrap());

/// Inline tags that are passed through untouched. Tag names fold ASCII case
/// only, so `<ſup>` is not taken for `<sup>`.
static INLINE_HTML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(/?)((?i-u:kbd|sub|sup|br|details|summary))(\s[^>]*)?/?>").unwrap()
});

/// Characters stripped from the end of a bare URL.
const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

/// Convert a span of inline Markdown into HTML.
///
/// The scanner walks the text once, left to right. At every position the
/// constructs are tried in a fixed order and the first one that matches is
/// consumed; if none does, the current character is escaped and emitted.
/// Nested content (link text, emphasis, strikethrough) is scanned
/// recursively.
pub fn inline_to_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while let Some(ch) = text[i..].chars().next() {
        let rest = &text[i..];

        if let Some(consumed) = scan_construct(ch, rest, &mut out) {
            i += consumed;
            continue;
        }

        escape_into(&rest[..ch.len_utf8()], &mut out);
        i += ch.len_utf8();
    }

    out
}

/// Try every inline construct at the start of `rest`.
///
/// Returns the number of bytes consumed, or `None` if nothing matched and
/// the caller should fall back to emitting `ch` literally.
fn scan_construct(ch: char, rest: &str, out: &mut String) -> Option<usize> {
    if ch == '\\' {
        if let Some(next) = rest[1..].chars().next() {
            escape_into(&rest[1..1 + next.len_utf8()], out);
            return Some(1 + next.len_utf8());
        }
    }

    if ch == '`' {
        if let Some(caps) = CODE_SPAN.captures(rest) {
            out.push_str("<code>");
            escape_into(&caps[1], out);
            out.push_str("</code>");
            return Some(caps[0].len());
        }
    }

    if rest.starts_with("![") {
        if let Some(caps) = IMAGE.captures(rest) {
            out.push_str("<img src=\"");
            escape_into(&caps[2], out);
            out.push_str("\" alt=\"");
            escape_into(&caps[1], out);
            out.push_str("\">");
            return Some(caps[0].len());
        }
    }

    if ch == '[' {
        if let Some(caps) = LINK.captures(rest) {
            out.push_str("<a href=\"");
            escape_into(&caps[2], out);
            out.push_str("\">");
            out.push_str(&inline_to_html(&caps[1]));
            out.push_str("</a>");
            return Some(caps[0].len());
        }
    }

    if ch == '*' || ch == '_' {
        if let Some(consumed) = scan_emphasis(ch, rest, out) {
            return Some(consumed);
        }
    }

    if rest.starts_with("~~") {
        if let Some(end) = find_from(rest, "~~", 2) {
            out.push_str("<del>");
            out.push_str(&inline_to_html(&rest[2..end]));
            out.push_str("</del>");
            return Some(end + 2);
        }
    }

    if let Some(m) = AUTOLINK.find(rest) {
        let url = m.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION);
        let escaped = escape(url);
        out.push_str("<a href=\"");
        out.push_str(&escaped);
        out.push_str("\">");
        out.push_str(&escaped);
        out.push_str("</a>");
        return Some(url.len());
    }

    if ch == '<' {
        if let Some(m) = INLINE_HTML.find(rest) {
            out.push_str(m.as_str());
            return Some(m.len());
        }
    }

    None
}

/// Emphasis opened by a run of `delim` at the start of `rest`.
///
/// The longest run is tried first: three delimiters give strong+em, two give
/// strong, one gives em. The closer must be a run of the same length made
/// of the same character. A single closer may directly follow the opener,
/// which yields an empty `<em></em>`.
fn scan_emphasis(delim: char, rest: &str, out: &mut String) -> Option<usize> {
    let triple = delim.to_string().repeat(3);
    let double = &triple[..2];
    let single = &triple[..1];

    if rest.starts_with(&triple) {
        if let Some(end) = find_from(rest, &triple, 3) {
            out.push_str("<strong><em>");
            out.push_str(&inline_to_html(&rest[3..end]));
            out.push_str("</em></strong>");
            return Some(end + 3);
        }
    }

    if rest.starts_with(double) {
        if let Some(end) = find_from(rest, double, 2) {
            out.push_str("<strong>");
            out.push_str(&inline_to_html(&rest[2..end]));
            out.push_str("</strong>");
            return Some(end + 2);
        }
    }

    let opens_word = rest[1..].chars().next().is_some_and(|c| !c.is_whitespace());
    if opens_word {
        if let Some(end) = find_from(rest, single, 1) {
            let closes_word = rest[..end].chars().next_back().is_some_and(|c| !c.is_whitespace());
            if closes_word {
                out.push_str("<em>");
                out.push_str(&inline_to_html(&rest[1..end]));
                out.push_str("</em>");
                return Some(end + 1);
            }
        }
    }

    None
}

/// Byte offset of the first `needle` in `haystack` at or after `from`.
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|pos| pos + from)
}
