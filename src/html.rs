use crate::block::{Block, HtmlBlock, List, Table};
use crate::config::Options;
use crate::escape::escape_into;
use crate::inline::inline_to_html;

/// Convert blocks to an HTML fragment
pub fn blocks_to_html(blocks: &[Block], options: &Options) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, options, &mut out);
    }
    out
}

fn emit_block(block: &Block, options: &Options, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            out.push_str(&inline_to_html(content));
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph { lines } => {
            out.push_str("<p>");
            if options.breaks {
                let rendered: Vec<String> = lines.iter().map(|l| inline_to_html(l)).collect();
                out.push_str(&rendered.join("<br>\n"));
            } else {
                // Joined first so emphasis and links can span soft wraps
                out.push_str(&inline_to_html(&lines.join("\n")));
            }
            out.push_str("</p>\n");
        }
        Block::CodeBlock { language, content } => {
            match language {
                Some(lang) => {
                    out.push_str("<pre><code class=\"language-");
                    out.push_str(lang);
                    out.push_str("\">");
                }
                None => out.push_str("<pre><code>"),
            }
            escape_into(content, out);
            out.push_str("</code></pre>\n");
        }
        Block::BlockQuote(inner) => {
            out.push_str("<blockquote>\n");
            out.push_str(&blocks_to_html(inner, options));
            out.push_str("</blockquote>\n");
        }
        Block::List(list) => {
            list_to_html(list, out);
            out.push('\n');
        }
        Block::Table(table) => {
            table_to_html(table, out);
            out.push('\n');
        }
        Block::Html(HtmlBlock::Raw { text, .. }) => {
            out.push_str(text);
            out.push('\n');
        }
        Block::Html(HtmlBlock::Details {
            opening,
            body,
            closing,
        }) => {
            out.push_str(opening);
            out.push('\n');
            out.push_str(&blocks_to_html(body, options));
            out.push_str(closing);
            out.push('\n');
        }
        Block::Rule => {
            out.push_str("<hr>\n");
        }
    }
}

fn list_to_html(list: &List, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push_str(&format!("<{tag}>\n"));

    for item in &list.items {
        out.push_str("<li>");
        match item.checked {
            Some(true) => out.push_str("<input type=\"checkbox\" checked disabled>"),
            Some(false) => out.push_str("<input type=\"checkbox\" disabled>"),
            None => {}
        }
        out.push_str(&inline_to_html(&item.content));

        for nested in &item.nested {
            out.push('\n');
            list_to_html(nested, out);
        }

        out.push_str("</li>\n");
    }

    out.push_str(&format!("</{tag}>"));
}

fn table_to_html(table: &Table, out: &mut String) {
    let align = |col: usize| table.alignments.get(col).copied().unwrap_or_default().as_str();

    out.push_str("<table>\n<thead>\n<tr>\n");
    for (col, header) in table.headers.iter().enumerate() {
        out.push_str(&format!("<th align=\"{}\">", align(col)));
        out.push_str(&inline_to_html(header));
        out.push_str("</th>\n");
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    // The header decides the column count
    for row in &table.rows {
        out.push_str("<tr>\n");
        for col in 0..table.headers.len() {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            out.push_str(&format!("<td align=\"{}\">", align(col)));
            out.push_str(&inline_to_html(cell));
            out.push_str("</td>\n");
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>");
}
