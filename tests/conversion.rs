use parsley::parse;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::empty("", "")]
#[case::heading("# Hello", "<h1>Hello</h1>\n")]
#[case::quote("> quoted **text**", "<blockquote>\n<p>quoted <strong>text</strong></p>\n</blockquote>\n")]
#[case::mixed_lists("- a\n1. b", "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>\n")]
#[case::broken_table("| a |\n| b |", "<p>| a |\n| b |</p>\n")]
#[case::unterminated_fence("```\n<x>", "<pre><code>&lt;x&gt;</code></pre>\n")]
#[case::unmatched_delimiters("*a ~~b `c", "<p>*a ~~b `c</p>\n")]
#[case::empty_emphasis("b**b", "<p>b<em></em>b</p>\n")]
#[case::lookalike_tag("<ſup>x", "<p>&lt;ſup&gt;x</p>\n")]
#[case::unterminated_html("<div>\n**x**", "<div>\n**x**\n")]
fn converts(#[case] markdown: &str, #[case] expected: &str) {
    assert_eq!(parse(markdown), expected);
}

#[test]
fn nested_list_stays_inside_first_item() {
    let html = parse("- a\n  - b\n- c");
    assert_eq!(html, "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul></li>\n<li>c</li>\n</ul>\n");
}

#[test]
fn task_list_checkboxes() {
    let html = parse("- [x] done\n- [ ] todo");
    assert_eq!(
        html,
        "<ul>\n\
         <li><input type=\"checkbox\" checked disabled>done</li>\n\
         <li><input type=\"checkbox\" disabled>todo</li>\n\
         </ul>\n"
    );
}

#[test]
fn table_alignment() {
    let html = parse("| A | B |\n|---|---:|\n| 1 | 2 |");
    assert!(html.contains("<th align=\"left\">A</th>"));
    assert!(html.contains("<th align=\"right\">B</th>"));
    assert!(html.contains("<td align=\"left\">1</td>\n<td align=\"right\">2</td>"));
    assert_eq!(html.matches("<tr>").count(), 2);
}

#[test]
fn document_with_every_block() {
    let markdown = "\
# Title

Intro with a [link](https://example.com) and `code`.

```sh
echo \"hi\"
```

---

> note

1. one
2. two

| k | v |
|:-:|---|
| x | y |

<details>
<summary>More</summary>

~~old~~ new
</details>";

    let expected = "\
<h1>Title</h1>
<p>Intro with a <a href=\"https://example.com\">link</a> and <code>code</code>.</p>
<pre><code class=\"language-sh\">echo &quot;hi&quot;</code></pre>
<hr>
<blockquote>
<p>note</p>
</blockquote>
<ol>
<li>one</li>
<li>two</li>
</ol>
<table>
<thead>
<tr>
<th align=\"center\">k</th>
<th align=\"left\">v</th>
</tr>
</thead>
<tbody>
<tr>
<td align=\"center\">x</td>
<td align=\"left\">y</td>
</tr>
</tbody>
</table>
<details>
<summary>More</summary>
<p><del>old</del> new</p>
</details>
";
    assert_eq!(parse(markdown), expected);
}

#[test]
fn degenerate_lines_terminate() {
    for markdown in ["# ", "#  ", "-", "- ", "1.", ">", "|", "|\n|", "```", "<div", "\r\n- a\r", "***\n___"] {
        let html = parse(markdown);
        assert!(html.ends_with('\n'), "{markdown:?} rendered as {html:?}");
    }
    assert_eq!(parse("# "), "<p># </p>\n");
    assert_eq!(parse(">"), "<blockquote>\n</blockquote>\n");
}

#[test]
fn deeply_nested_quotes() {
    let markdown = format!("{} deep", ">".repeat(20));
    let html = parse(&markdown);
    assert_eq!(html.matches("<blockquote>").count(), 20);
    assert!(html.contains("<p>deep</p>"));
}
