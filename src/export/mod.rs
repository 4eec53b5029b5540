//! Document export: layout of text blocks onto pages, and page writers.
//!
//! Layout is pure. Only [`writer::TextPageWriter::finish`] touches the
//! filesystem.

pub mod document;
pub mod layout;
pub mod wrap;
pub mod writer;

// Re-export for convenience
pub use document::{history_document, summary_document, Document, ExportKind, ExportLayout};
pub use layout::{
    layout, DocumentBlock, LayoutLine, LayoutPage, LayoutSession, LineKind, LineMetric,
    PageGeometry, SectionStyle,
};
pub use writer::{render_text, write_document, DocumentWriter, TextPageWriter};
