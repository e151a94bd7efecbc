//! Watermark removal pipeline: decode, prune every page, re-encode

use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::Result;
use crate::pdf::prune::{find_marked, remove_marked};
use crate::pdf::reader::PdfReader;
use crate::pdf::signature::{Signature, WATERMARK_DEMO};
use crate::pdf::writer::PdfWriter;

/// Options for removing watermarks from a PDF
#[derive(Debug, Clone)]
pub struct UnmarkOptions {
    /// Input PDF file path
    pub input_path: PathBuf,
    /// Output PDF file path; may be the same as the input
    pub output_path: PathBuf,
    /// Report what would be removed without writing the output
    pub dry_run: bool,
}

impl UnmarkOptions {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            dry_run: false,
        }
    }
}

/// What happened to one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// 1-based page number
    pub page_number: usize,
    /// Names of the XObject resources that were removed
    pub removed: Vec<String>,
}

impl PageOutcome {
    pub fn found(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Per-page outcomes of a run, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnmarkReport {
    pub pages: Vec<PageOutcome>,
}

impl UnmarkReport {
    /// Number of pages a watermark was removed from
    pub fn pages_cleaned(&self) -> usize {
        self.pages.iter().filter(|page| page.found()).count()
    }
}

/// Remove the Master PDF Editor demo watermark from every page of a PDF
///
/// # Example
///
/// ```no_run
/// use pdf_no_wm::pdf::{remove_watermarks, UnmarkOptions};
///
/// let options = UnmarkOptions::new("input.pdf", "output.pdf");
/// let report = remove_watermarks(&options).expect("Failed to remove watermark");
/// println!("cleaned {} pages", report.pages_cleaned());
/// ```
pub fn remove_watermarks(options: &UnmarkOptions) -> Result<UnmarkReport> {
    let mut reader = PdfReader::open(&options.input_path)?;

    if options.dry_run {
        let report = survey_document(&reader, &WATERMARK_DEMO);
        info!(
            pages = report.pages.len(),
            marked = report.pages_cleaned(),
            "dry run, not writing output"
        );
        return Ok(report);
    }

    let (report, writer) = unmark_document(&mut reader, &WATERMARK_DEMO)?;
    writer.write(reader.into_document(), &options.output_path)?;
    info!(
        output = %options.output_path.display(),
        pages = report.pages.len(),
        cleaned = report.pages_cleaned(),
        "wrote output"
    );

    Ok(report)
}

/// List the pages of a decoded document that carry `signature`, without
/// modifying anything.
pub fn survey_document(reader: &PdfReader, signature: &Signature<'_>) -> UnmarkReport {
    let pages = reader
        .page_ids()
        .into_iter()
        .enumerate()
        .map(|(idx, page_id)| {
            outcome(idx + 1, find_marked(reader.document(), page_id, signature))
        })
        .collect();

    UnmarkReport { pages }
}

/// Strip `signature` from every page of a decoded document, in document
/// order, and queue each page on a writer.
pub fn unmark_document(
    reader: &mut PdfReader,
    signature: &Signature<'_>,
) -> Result<(UnmarkReport, PdfWriter)> {
    let page_ids = reader.page_ids();
    let doc = reader.document_mut();
    let mut writer = PdfWriter::new();
    let mut report = UnmarkReport::default();

    for (idx, page_id) in page_ids.into_iter().enumerate() {
        let page = outcome(idx + 1, remove_marked(doc, page_id, signature));
        writer.add_page(doc, page_id)?;
        report.pages.push(page);
    }

    Ok((report, writer))
}

fn outcome(page_number: usize, removed: Vec<Vec<u8>>) -> PageOutcome {
    let removed: Vec<String> = removed
        .iter()
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect();

    if removed.is_empty() {
        debug!(page = page_number, "no watermark found");
    } else {
        debug!(page = page_number, resources = ?removed, "watermark found");
    }

    PageOutcome {
        page_number,
        removed,
    }
}
