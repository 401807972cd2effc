//! Structured page content produced by the extractor.

use serde::{Deserialize, Serialize};

/// Titled sections, paragraph text and image sources of one web page.
///
/// Produced once per session and immutable afterward; every sequence keeps
/// document order. Empty sequences are valid.
///
/// # Examples
///
/// ```
/// use msight_core::ExtractedContent;
///
/// let content = ExtractedContent::new(
///     vec!["T1".to_string()],
///     vec!["P1".to_string(), "P2".to_string()],
///     vec![],
/// );
/// assert_eq!(content.paragraphs().len(), 2);
/// assert!(!content.is_empty());
/// assert!(ExtractedContent::default().is_empty());
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct ExtractedContent {
    /// Text of every second-level heading
    titles: Vec<String>,
    /// Text of every paragraph
    paragraphs: Vec<String>,
    /// `src` of every image that has one
    images: Vec<String>,
}

impl ExtractedContent {
    /// Create extracted content from its three sequences.
    pub fn new(titles: Vec<String>, paragraphs: Vec<String>, images: Vec<String>) -> Self {
        Self {
            titles,
            paragraphs,
            images,
        }
    }

    /// True when the page had no matching elements at all.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty() && self.paragraphs.is_empty() && self.images.is_empty()
    }
}
