//! PDF watermark remover
//!
//! Strips the demo watermark that Master PDF Editor stamps on every page.
//! The watermark is a form XObject whose dictionary carries
//! `/PieceInfo << /ADBE_CompoundType << /Private /WatermarkDemo >> >>`;
//! this library:
//! - Matches nested key-path signatures in the PDF object graph
//! - Removes signed XObjects from each page's resource table
//! - Re-emits the document with everything else untouched
//!
//! # Example
//!
//! ```no_run
//! use pdf_no_wm::pdf::{remove_watermarks, UnmarkOptions};
//!
//! let options = UnmarkOptions::new("scan.pdf", "clean.pdf");
//! let report = remove_watermarks(&options).expect("Failed to remove watermark");
//!
//! for page in &report.pages {
//!     println!("page {}: {:?}", page.page_number, page.removed);
//! }
//! ```

pub mod error;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};
