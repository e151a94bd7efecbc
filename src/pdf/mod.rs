//! PDF watermark removal module

pub mod page;
pub mod prune;
pub mod reader;
pub mod signature;
pub mod unmark;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used items
pub use prune::{find_marked, prune_page, prune_xobjects, remove_marked};
pub use reader::PdfReader;
pub use signature::{matches, Detached, Resolve, Signature, WATERMARK_DEMO};
pub use unmark::{
    remove_watermarks, survey_document, unmark_document, PageOutcome, UnmarkOptions,
    UnmarkReport,
};
pub use writer::PdfWriter;
