//! Content Extractor for M-Sight.
//!
//! Fetches one page over HTTP and reduces it to second-level headings,
//! paragraph text and image sources, in document order.
//!
//! # Example
//!
//! ```
//! use msight_scraper::extract_from_html;
//!
//! let html = "<h2>Pricing</h2><p>From $5</p><img src=\"/a.png\"><img>";
//! let content = extract_from_html(html).unwrap();
//! assert_eq!(content.titles(), &["Pricing".to_string()]);
//! assert_eq!(content.images(), &["/a.png".to_string()]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extract;
mod webpage;

pub use extract::extract_from_html;
pub use webpage::WebpageScraper;
