//! Selector-based extraction from parsed markup.

use msight_core::ExtractedContent;
use msight_error::ParseError;
use scraper::{Html, Selector};

const TITLE_SELECTOR: &str = "h2";
const PARAGRAPH_SELECTOR: &str = "p";
const IMAGE_SELECTOR: &str = "img[src]";

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::new(format!("Invalid selector '{}': {}", css, e)))
}

/// Extract headings, paragraphs and image sources from an HTML document.
///
/// Element text is the concatenation of all descendant text nodes, kept as
/// found in the page. Images with an empty `src` are skipped. A document with
/// no matching elements yields empty sequences.
pub fn extract_from_html(html: &str) -> Result<ExtractedContent, ParseError> {
    let document = Html::parse_document(html);

    let titles = document
        .select(&selector(TITLE_SELECTOR)?)
        .map(|element| element.text().collect::<String>())
        .collect();

    let paragraphs = document
        .select(&selector(PARAGRAPH_SELECTOR)?)
        .map(|element| element.text().collect::<String>())
        .collect();

    let images = document
        .select(&selector(IMAGE_SELECTOR)?)
        .filter_map(|element| element.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect();

    Ok(ExtractedContent::new(titles, paragraphs, images))
}
