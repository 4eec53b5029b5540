//! Page writers: the seam between laid-out pages and an output format.
//!
//! PDF painting lives outside this crate. [`TextPageWriter`] renders pages as
//! plain text so exports can be inspected and diffed.

use super::document::Document;
use super::layout::{LayoutLine, PageGeometry};
use crate::model::error::ExportError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Receives pages in order and produces an output file.
pub trait DocumentWriter {
    /// Called once before the first page with the document's geometry.
    fn begin_document(&mut self, _geometry: &PageGeometry) {}

    /// Start page `number` (1-based).
    fn begin_page(&mut self, number: usize);

    /// Paint one line on the current page.
    fn write_line(&mut self, line: &LayoutLine);

    /// Write everything received so far under `file_name`.
    fn finish(&mut self, file_name: &str) -> Result<PathBuf, ExportError>;
}

/// Feed every page of `document` to `writer` and finish it under the
/// document's file name.
pub fn write_document<W: DocumentWriter + ?Sized>(
    document: &Document,
    writer: &mut W,
) -> Result<PathBuf, ExportError> {
    writer.begin_document(&document.geometry);
    for page in &document.pages {
        writer.begin_page(page.number);
        for line in &page.lines {
            writer.write_line(line);
        }
    }
    writer.finish(document.file_name())
}

const PAGE_SEPARATOR: char = '\u{000C}';

/// Writes pages as text: one row per line, indented by its x offset from the
/// left margin, with a form feed between pages.
///
/// The file takes the document's name with a `.txt` extension.
#[derive(Debug, Clone)]
pub struct TextPageWriter {
    out_dir: PathBuf,
    buffer: String,
    pages: usize,
    /// X position rendered as column 0.
    origin_x: u32,
}

impl TextPageWriter {
    /// Writer that saves into `out_dir`, created on finish if missing.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            buffer: String::new(),
            pages: 0,
            origin_x: PageGeometry::default().left_margin,
        }
    }

    /// Text rendered so far.
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Path the writer would produce for `file_name`.
    pub fn target_path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(Path::new(file_name).with_extension("txt"))
    }
}

impl DocumentWriter for TextPageWriter {
    fn begin_document(&mut self, geometry: &PageGeometry) {
        self.origin_x = geometry.left_margin;
    }

    fn begin_page(&mut self, _number: usize) {
        if self.pages > 0 {
            self.buffer.push(PAGE_SEPARATOR);
            self.buffer.push('\n');
        }
        self.pages += 1;
    }

    fn write_line(&mut self, line: &LayoutLine) {
        let indent = line.x.saturating_sub(self.origin_x) as usize;
        self.buffer.extend(std::iter::repeat_n(' ', indent));
        self.buffer.push_str(&line.text);
        self.buffer.push('\n');
    }

    fn finish(&mut self, file_name: &str) -> Result<PathBuf, ExportError> {
        if file_name.trim().is_empty() {
            return Err(ExportError::EmptyFileName);
        }
        let path = self.target_path(file_name);

        fs::create_dir_all(&self.out_dir).map_err(|source| ExportError::Io {
            path: self.out_dir.clone(),
            source,
        })?;
        fs::write(&path, &self.buffer).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), pages = self.pages, "Export written");
        Ok(path)
    }
}

/// Render `document` to text without touching the filesystem.
pub fn render_text(document: &Document) -> String {
    let mut writer = TextPageWriter::new(PathBuf::new());
    writer.begin_document(&document.geometry);
    for page in &document.pages {
        writer.begin_page(page.number);
        for line in &page.lines {
            writer.write_line(line);
        }
    }
    writer.buffer
}
