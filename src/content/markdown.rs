//! Plain-text views of markdown bodies

use lazy_static::lazy_static;
use pulldown_cmark::{Event, Options, Parser, TagEnd};
use regex::Regex;

lazy_static! {
    static ref MORE_MARKER: Regex = Regex::new(r"<!--\s*more\s*-->").unwrap();
}

/// Split a body at its `<!-- more -->` marker
/// Returns the text before the marker, if the marker is present
pub fn split_excerpt(body: &str) -> Option<&str> {
    MORE_MARKER.find(body).map(|m| body[..m.start()].trim())
}

/// Strip markup from a markdown body, keeping readable text
pub fn plain_text(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut text = String::with_capacity(markdown.len());
    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::CodeBlock)
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::TableCell) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `words` words of `text`
pub fn truncate_words(text: &str, words: usize) -> String {
    text.split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count words in a markdown body, ignoring markup
pub fn word_count(markdown: &str) -> usize {
    plain_text(markdown).split_whitespace().count()
}
