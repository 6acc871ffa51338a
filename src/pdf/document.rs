//! PDF document assembly.
//!
//! Serializes the label pages into a complete PDF byte stream by hand:
//! catalog, page tree, per-page content streams with their length objects,
//! the two font objects, the cross-reference table, and the trailer. Object
//! byte offsets are recorded while writing, never recomputed after the fact.

use super::content::ContentBuilder;
use super::fonts::{RES_BOLD, RES_REGULAR};
use crate::config::{LabelRecord, LayoutConfig};
use crate::error::LabelError;

const PDF_HEADER: &str = "%PDF-1.4";
const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;

/// Accumulates the output line by line and records where each object starts.
///
/// Lines are joined with single newlines, so the running byte total advances
/// by the line length plus one per push.
struct ObjectWriter {
    lines: Vec<String>,
    total: usize,
    offsets: Vec<usize>, // index by object id; 0 is the free object
}

impl ObjectWriter {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            total: 0,
            offsets: vec![0],
        }
    }

    fn push_line(&mut self, line: String) {
        self.total += line.len() + 1;
        self.lines.push(line);
    }

    /// Mark the next pushed line as the start of object `id`. Ids must be
    /// assigned contiguously from 1.
    fn begin_object(&mut self, id: usize) {
        debug_assert_eq!(id, self.offsets.len(), "object ids must be contiguous");
        self.offsets.push(self.total);
    }

    /// Byte offset where the next pushed line will start.
    fn position(&self) -> usize {
        self.total
    }

    fn into_bytes(self) -> Vec<u8> {
        self.lines.join("\n").into_bytes()
    }
}

/// Partition records into pages of at most `per_page`, in input order.
///
/// An empty record list is fine and yields no pages; a chunk size of zero is
/// rejected.
pub fn paginate(
    records: &[LabelRecord],
    per_page: usize,
) -> Result<Vec<&[LabelRecord]>, LabelError> {
    if per_page == 0 {
        return Err(LabelError::InvalidLabelCount(per_page));
    }
    Ok(records.chunks(per_page).collect())
}

/// Assemble the complete PDF for `records`.
///
/// Pure and all-or-nothing: every content stream is built before the first
/// output byte, so a failing record leaves nothing behind.
pub fn create_labels_pdf(
    records: &[LabelRecord],
    cfg: &LayoutConfig,
) -> Result<Vec<u8>, LabelError> {
    let pages = paginate(records, cfg.labels_per_page)?;
    let page_count = pages.len();

    let mut streams = Vec::with_capacity(page_count);
    for chunk in &pages {
        let mut builder = ContentBuilder::new();
        for (slot, record) in chunk.iter().enumerate() {
            builder.add_label(slot, record, cfg)?;
        }
        streams.push(builder.build());
    }

    // Objects 3..2+2P hold the (page node, content stream) pairs, followed
    // by one length object per page and the two font objects.
    let font_regular_id = 3 + page_count * 3;
    let font_bold_id = 4 + page_count * 3;
    let object_count = 4 + page_count * 3;

    let mut w = ObjectWriter::new();
    w.push_line(PDF_HEADER.to_string());

    w.begin_object(CATALOG_ID);
    w.push_line(format!(
        "{CATALOG_ID} 0 obj<</Type/Catalog/Pages {PAGES_ID} 0 R>>endobj"
    ));

    let kids = (0..page_count)
        .map(|i| format!("{} 0 R", 3 + i * 2))
        .collect::<Vec<_>>()
        .join(" ");
    w.begin_object(PAGES_ID);
    w.push_line(format!(
        "{PAGES_ID} 0 obj<</Type/Pages/Kids[{kids}]/Count {page_count}>>endobj"
    ));

    for (i, stream) in streams.iter().enumerate() {
        let page_id = 3 + i * 2;
        let stream_id = 4 + i * 2;
        let length_id = 3 + page_count * 2 + i;

        w.begin_object(page_id);
        w.push_line(format!(
            "{page_id} 0 obj<</Type/Page/Parent {PAGES_ID} 0 R/MediaBox[0 0 {} {}]/Contents {stream_id} 0 R/Resources<</Font<</{RES_REGULAR} {font_regular_id} 0 R/{RES_BOLD} {font_bold_id} 0 R>>>>>>endobj",
            cfg.page_width, cfg.page_height
        ));

        w.begin_object(stream_id);
        w.push_line(format!(
            "{stream_id} 0 obj<</Length {length_id} 0 R>>stream"
        ));
        w.push_line(stream.clone());
        w.push_line("endstream".to_string());
        w.push_line("endobj".to_string());
    }

    for (i, stream) in streams.iter().enumerate() {
        let length_id = 3 + page_count * 2 + i;
        w.begin_object(length_id);
        w.push_line(format!("{length_id} 0 obj"));
        w.push_line(stream.len().to_string());
        w.push_line("endobj".to_string());
    }

    w.begin_object(font_regular_id);
    w.push_line(format!(
        "{font_regular_id} 0 obj<</Type/Font/Subtype/Type1/BaseFont/{}>>endobj",
        cfg.font_regular.base_font_name()
    ));
    w.begin_object(font_bold_id);
    w.push_line(format!(
        "{font_bold_id} 0 obj<</Type/Font/Subtype/Type1/BaseFont/{}>>endobj",
        cfg.font_bold.base_font_name()
    ));

    // Cross-reference table: one entry per object in id order, preceded by
    // the free-list head.
    let xref_start = w.position();
    let entries: Vec<usize> = w.offsets[1..].to_vec();
    w.push_line("xref".to_string());
    w.push_line(format!("0 {}", object_count + 1));
    w.push_line("0000000000 65535 f ".to_string());
    for offset in entries {
        w.push_line(format!("{offset:010} 00000 n "));
    }

    w.push_line(format!(
        "trailer<</Size {}/Root {CATALOG_ID} 0 R>>",
        object_count + 1
    ));
    w.push_line("startxref".to_string());
    w.push_line(xref_start.to_string());
    w.push_line("%%EOF".to_string());

    Ok(w.into_bytes())
}
