//! Source normalization: payload extraction, display names and URL resolution

mod catalog;
pub mod display;
mod extractor;
pub mod rules;
mod url_table;

pub use display::{display_name, file_name};
pub use extractor::{SourceExtractor, MAX_CONTENT_CHARS};
pub use url_table::{CatalogEntry, UrlTable};
