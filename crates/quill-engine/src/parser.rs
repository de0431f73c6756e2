//! Layout-specific parsers. Each takes the outer HTML of the fragment the
//! extraction strategy located and yields canonical [`QuoteRecord`]s.

use crate::config::AuthorMarker;
use quill_common::protocol::QuoteRecord;
use quill_common::{QuillError, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

const TABLE_AUTHOR_DELIMITER: &str = " Author: ";
const FILTER_TAG_DELIMITER: char = ',';

/// A quote block from the div/span layout. `author_url` is the `(about)` link
/// when the layout carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuote {
    pub record: QuoteRecord,
    pub author_url: Option<String>,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| QuillError::Parse(format!("bad selector {}: {:?}", css, e)))
}

/// Rendered text with whitespace runs collapsed to single spaces.
fn text_of(element: ElementRef<'_>) -> String {
    collapse(&element.text().collect::<Vec<_>>().join(" "))
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn parse_quote_block(html: &str, marker: AuthorMarker) -> Result<ParsedQuote> {
    let fragment = Html::parse_fragment(html);

    let text = fragment
        .select(&selector("span")?)
        .next()
        .map(text_of)
        .ok_or_else(|| QuillError::Parse("quote block has no span".into()))?;

    let author_css = match marker {
        AuthorMarker::Class => ".author",
        AuthorMarker::Tag => "author",
    };
    let author = fragment
        .select(&selector(author_css)?)
        .next()
        .map(text_of)
        .ok_or_else(|| QuillError::Parse(format!("quote block has no {}", author_css)))?;

    let tags = fragment
        .select(&selector(".tags a")?)
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect();

    let author_url = fragment
        .select(&selector("a[href*=\"/author/\"]")?)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);

    Ok(ParsedQuote {
        record: QuoteRecord { text, author, tags },
        author_url,
    })
}

/// Table layout: after dropping the header and footer rows, rows come in
/// pairs of `"<text> Author: <name>"` and `"Tags: <tag> <tag> ..."`.
pub fn parse_table(html: &str) -> Result<Vec<QuoteRecord>> {
    let fragment = Html::parse_fragment(html);
    let rows: Vec<String> = fragment.select(&selector("tr")?).map(text_of).collect();
    if rows.len() <= 2 {
        return Ok(Vec::new());
    }

    let body: Vec<&String> = rows[1..rows.len() - 1]
        .iter()
        .filter(|r| !r.is_empty())
        .collect();

    let mut records = Vec::with_capacity(body.len() / 2);
    for pair in body.chunks(2) {
        let [quote_row, tags_row] = pair else {
            warn!("dropping unpaired table row: {:?}", pair[0]);
            break;
        };
        let (text, author) = quote_row
            .split_once(TABLE_AUTHOR_DELIMITER)
            .ok_or_else(|| QuillError::Parse(format!("no author in row {:?}", quote_row)))?;
        let tags = tags_row
            .split_whitespace()
            .skip(1)
            .map(str::to_string)
            .collect();
        records.push(QuoteRecord::new(text.trim(), author.trim(), tags));
    }
    Ok(records)
}

/// Filter results: a flat run of `text, author, tag` spans with no per-quote
/// container. The tag cell is a single label and is split into a list here.
pub fn parse_filter_results(html: &str) -> Result<Vec<QuoteRecord>> {
    let fragment = Html::parse_fragment(html);
    let cells: Vec<String> = fragment.select(&selector("span")?).map(text_of).collect();
    if cells.len() % 3 != 0 {
        return Err(QuillError::Parse(format!(
            "filter results hold {} cells, not a multiple of 3",
            cells.len()
        )));
    }

    Ok(cells
        .chunks(3)
        .map(|c| QuoteRecord::new(c[0].clone(), c[1].clone(), split_tags(&c[2])))
        .collect())
}

pub fn split_tags(label: &str) -> Vec<String> {
    label
        .split(FILTER_TAG_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
