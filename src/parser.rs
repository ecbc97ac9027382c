use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::block::{Alignment, Block, HtmlBlock, List, ListItem, Table};

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(-{3,}|\*{3,}|_{3,})$").unwrap());

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(-|\*|\+|[0-9]+\.)\s+(.*)$").unwrap());

static TASK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[([ xX])\]\s*(.*)$").unwrap());

static TABLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|?[\s\-:|]+\|?$").unwrap());

/// Block-level tags whose content is passed through. Captures the full tag
/// word, so `<divider>` yields `divider`. Only ASCII case is folded.
static HTML_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^<((?i-u:details|div|section|article|aside|header|footer|nav|form|fieldset|figure|figcaption|main)[A-Za-z0-9_]*)",
    )
    .unwrap()
});

static DETAILS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(<(?i-u:details)[^>]*>.*?</(?i-u:summary)>)(.*?)(</(?i-u:details)>)$")
        .unwrap()
});

/// Parse markdown text into a list of blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    let markdown = normalize_newlines(markdown);
    let lines: Vec<&str> = markdown.split('\n').collect();
    debug!(lines = lines.len(), "parsing markdown");
    parse_lines(&lines)
}

fn normalize_newlines(markdown: &str) -> Cow<'_, str> {
    if markdown.contains('\r') {
        Cow::Owned(markdown.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(markdown)
    }
}

/// The block dispatcher. Recognizes one block per iteration, in priority
/// order, and never revisits a consumed line.
fn parse_lines(lines: &[&str]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if is_blank(line) {
            i += 1;
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            blocks.push(Block::Heading {
                level: caps[1].len() as u8,
                content: caps[2].to_string(),
            });
            i += 1;
            continue;
        }

        if line.starts_with("```") {
            let (block, next) = parse_code_block(lines, i);
            blocks.push(block);
            i = next;
            continue;
        }

        if RULE.is_match(line) {
            blocks.push(Block::Rule);
            i += 1;
            continue;
        }

        if line.starts_with('>') {
            let (block, next) = parse_blockquote(lines, i);
            blocks.push(block);
            i = next;
            continue;
        }

        if let Some(caps) = LIST_ITEM.captures(line) {
            let indent = caps[1].chars().count();
            let parsed = parse_list(lines, i, indent, Some(is_ordered_marker(&caps[2])));
            blocks.push(Block::List(List {
                ordered: parsed.ordered,
                items: parsed.items,
            }));
            i = parsed.end;
            continue;
        }

        if is_table_start(lines, i) {
            let (block, next) = parse_table(lines, i);
            blocks.push(block);
            i = next;
            continue;
        }

        if let Some(caps) = HTML_BLOCK.captures(line) {
            let tag = caps[1].to_ascii_lowercase();
            let (block, next) = parse_html_block(lines, i, tag);
            blocks.push(block);
            i = next;
            continue;
        }

        // The first line always belongs to the paragraph, even if it looked
        // like a block start that failed to parse (e.g. `# ` with no text).
        let mut paragraph = vec![line.to_string()];
        i += 1;
        while i < lines.len() && !is_blank(lines[i]) && !starts_block(lines, i) {
            paragraph.push(lines[i].to_string());
            i += 1;
        }
        blocks.push(Block::Paragraph { lines: paragraph });
    }

    blocks
}

/// Whether the line at `i` would be claimed by a block other than a
/// paragraph.
fn starts_block(lines: &[&str], i: usize) -> bool {
    let line = lines[i];
    HEADING.is_match(line)
        || line.starts_with("```")
        || RULE.is_match(line)
        || line.starts_with('>')
        || LIST_ITEM.is_match(line)
        || is_table_start(lines, i)
        || HTML_BLOCK.is_match(line)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn is_ordered_marker(marker: &str) -> bool {
    marker.ends_with('.')
}

fn parse_code_block(lines: &[&str], start: usize) -> (Block, usize) {
    let language = lines[start][3..].trim();
    let body_start = start + 1;
    let mut i = body_start;
    while i < lines.len() && !lines[i].starts_with("```") {
        i += 1;
    }

    if i >= lines.len() {
        trace!(line = start, "unterminated code fence, consuming to end of input");
    }

    let block = Block::CodeBlock {
        language: (!language.is_empty()).then(|| language.to_string()),
        content: lines[body_start..i].join("\n"),
    };
    (block, (i + 1).min(lines.len()))
}

fn parse_blockquote(lines: &[&str], start: usize) -> (Block, usize) {
    let mut inner = Vec::new();
    let mut i = start;
    while i < lines.len() && lines[i].starts_with('>') {
        inner.push(strip_quote_marker(lines[i]));
        i += 1;
    }
    (Block::BlockQuote(parse_lines(&inner)), i)
}

/// Drop the leading `>` and at most one whitespace character after it.
fn strip_quote_marker(line: &str) -> &str {
    let rest = &line[1..];
    match rest.chars().next() {
        Some(c) if c.is_whitespace() => &rest[c.len_utf8()..],
        _ => rest,
    }
}

struct ParsedList {
    items: Vec<ListItem>,
    end: usize,
    ordered: bool,
}

/// Parse list items whose markers sit at exactly `indent`.
///
/// Deeper markers open a nested list on the current item, deeper plain
/// lines are lazy continuations of it. The list ends at a non-blank line
/// shallower than `indent`, at a marker of the other kind, or at any line
/// that is neither an item nor a continuation.
fn parse_list(lines: &[&str], start: usize, indent: usize, ordered: Option<bool>) -> ParsedList {
    let mut items = Vec::new();
    let mut current: Option<ListItem> = None;
    let mut ordered = ordered;
    let mut i = start;

    while i < lines.len() {
        let line = lines[i];
        let blank = is_blank(line);
        let line_indent = leading_whitespace(line);

        if line_indent < indent && !blank {
            break;
        }

        if let Some(caps) = LIST_ITEM.captures(line) {
            let is_ordered = is_ordered_marker(&caps[2]);

            if line_indent == indent {
                if ordered.is_some_and(|o| o != is_ordered) {
                    break;
                }
                ordered = Some(is_ordered);
                items.extend(current.take());
                current = Some(list_item(&caps[3]));
                i += 1;
                continue;
            }

            if let Some(item) = current.as_mut() {
                let nested = parse_list(lines, i, line_indent, Some(is_ordered));
                item.nested.push(List {
                    ordered: nested.ordered,
                    items: nested.items,
                });
                i = nested.end;
                continue;
            }
        }

        if line_indent > indent && !blank {
            if let Some(item) = current.as_mut() {
                item.content.push('\n');
                item.content.push_str(line.trim());
                i += 1;
                continue;
            }
        }

        if blank {
            i += 1;
            continue;
        }

        break;
    }

    items.extend(current);

    ParsedList {
        items,
        end: i,
        ordered: ordered.unwrap_or(false),
    }
}

fn list_item(content: &str) -> ListItem {
    match TASK.captures(content) {
        Some(caps) => ListItem {
            content: caps[2].to_string(),
            checked: Some(caps[1].eq_ignore_ascii_case("x")),
            nested: Vec::new(),
        },
        None => ListItem {
            content: content.to_string(),
            checked: None,
            nested: Vec::new(),
        },
    }
}

/// A table needs a header line with `|` followed by a separator line that
/// also contains `|`.
fn is_table_start(lines: &[&str], i: usize) -> bool {
    let Some(next) = lines.get(i + 1) else {
        return false;
    };
    if !lines[i].contains('|') || !TABLE_SEPARATOR.is_match(next) {
        return false;
    }
    if !next.contains('|') {
        trace!(line = i, "separator without pipes, not a table");
        return false;
    }
    true
}

fn parse_table(lines: &[&str], start: usize) -> (Block, usize) {
    let mut end = start;
    while end < lines.len() && lines[end].contains('|') {
        end += 1;
    }

    let headers = split_row(lines[start]);
    let alignments = split_row(lines[start + 1])
        .iter()
        .map(|cell| column_alignment(cell))
        .collect();
    let rows = lines[start + 2..end].iter().map(|line| split_row(line)).collect();

    let table = Table {
        headers,
        alignments,
        rows,
    };
    (Block::Table(table), end)
}

/// Split a table row into trimmed cells, ignoring one outer pipe per side.
fn split_row(line: &str) -> Vec<String> {
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn column_alignment(separator: &str) -> Alignment {
    if separator.starts_with(':') && separator.ends_with(':') {
        Alignment::Center
    } else if separator.ends_with(':') {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

/// Capture a raw HTML block by counting opening and closing `tag`s on the
/// lines after the first until they balance.
fn parse_html_block(lines: &[&str], start: usize, tag: String) -> (Block, usize) {
    let mut depth: isize = 1;
    let mut i = start + 1;
    while i < lines.len() && depth > 0 {
        depth += count_opening_tags(lines[i], &tag) as isize;
        depth -= count_closing_tags(lines[i], &tag) as isize;
        i += 1;
    }

    if depth > 0 {
        trace!(tag = %tag, line = start, "unterminated html block, consuming to end of input");
    }

    let text = lines[start..i].join("\n");

    if tag == "details" {
        if let Some(caps) = DETAILS.captures(&text) {
            let body: Vec<&str> = caps[2].trim().split('\n').collect();
            let block = HtmlBlock::Details {
                opening: caps[1].to_string(),
                body: parse_lines(&body),
                closing: caps[3].to_string(),
            };
            return (Block::Html(block), i);
        }
    }

    (Block::Html(HtmlBlock::Raw { tag, text }), i)
}

/// Occurrences of `<tag` followed by whitespace or `>`, ignoring case.
fn count_opening_tags(line: &str, tag: &str) -> usize {
    let lower = line.to_ascii_lowercase();
    let needle = format!("<{tag}");
    lower
        .match_indices(&needle)
        .filter(|(pos, _)| {
            lower[pos + needle.len()..]
                .chars()
                .next()
                .is_some_and(|c| c == '>' || c.is_whitespace())
        })
        .count()
}

fn count_closing_tags(line: &str, tag: &str) -> usize {
    line.to_ascii_lowercase().matches(&format!("</{tag}>")).count()
}
