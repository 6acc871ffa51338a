//! Hand-rolled PDF output: content streams, object serialization, fonts.

pub mod content;
pub mod document;
pub mod fonts;

pub use document::create_labels_pdf;
