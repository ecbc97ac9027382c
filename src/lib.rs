//! A small self-contained Markdown to HTML converter.
//!
//! Block structure (headings, fenced code, lists, tables, blockquotes, raw
//! HTML) is recognized line by line, inline markup by a single left-to-right
//! scan. No external Markdown library is involved.
//!
//! ```
//! assert_eq!(parsley::parse("# Hello"), "<h1>Hello</h1>\n");
//! ```

mod block;
mod config;
mod escape;
mod html;
mod inline;
mod parser;

use std::sync::{PoisonError, RwLock};

pub use block::{Alignment, Block, HtmlBlock, List, ListItem, Table};
pub use config::{Config, ConfigError, Options, OptionsUpdate};
pub use escape::escape;
pub use inline::inline_to_html;

/// Process-wide options read by [`parse`]. Writers are expected not to race
/// with parses that must agree on a single configuration.
static OPTIONS: RwLock<Options> = RwLock::new(Options::DEFAULT);

/// Convert markdown to an HTML fragment using the process-wide options.
pub fn parse(markdown: &str) -> String {
    parse_with_options(markdown, &options())
}

/// Merge `update` into the process-wide options used by [`parse`].
pub fn set_options(update: OptionsUpdate) {
    let mut options = OPTIONS.write().unwrap_or_else(PoisonError::into_inner);
    options.merge(update);
    tracing::debug!(gfm = options.gfm, breaks = options.breaks, "options updated");
}

/// Snapshot of the process-wide options.
pub fn options() -> Options {
    *OPTIONS.read().unwrap_or_else(PoisonError::into_inner)
}

/// Convert markdown to an HTML fragment with explicit options.
pub fn parse_with_options(markdown: &str, options: &Options) -> String {
    render_html(&parse_blocks(markdown), options)
}

/// Parse markdown text into a vector of blocks.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Render parsed blocks as an HTML fragment.
pub fn render_html(blocks: &[Block], options: &Options) -> String {
    html::blocks_to_html(blocks, options)
}
