/// A single list item, which can contain nested lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Raw inline text; lazy continuation lines are joined with `\n`.
    pub content: String,
    /// `Some` for task items (`[ ]` / `[x]`).
    pub checked: Option<bool>,
    pub nested: Vec<List>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Column alignment taken from a table's separator row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub alignments: Vec<Alignment>,
    /// Cells as written; rows may be shorter or longer than `headers`.
    pub rows: Vec<Vec<String>>,
}

/// Raw HTML captured from the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlBlock {
    /// Emitted verbatim.
    Raw { tag: String, text: String },
    /// A `<details>` element whose body after `</summary>` is Markdown.
    Details {
        opening: String,
        body: Vec<Block>,
        closing: String,
    },
}

/// Block-level elements parsed from Markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        content: String,
    },
    Paragraph {
        lines: Vec<String>,
    },
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    BlockQuote(Vec<Block>),
    List(List),
    Table(Table),
    Html(HtmlBlock),
    Rule,
}
