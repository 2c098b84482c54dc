//! Ingestion pipeline
//!
//! Turns the published spreadsheet into the sorted post list:
//!
//! 1. **Source**: fetch the CSV export (HTTP or local file)
//! 2. **Parse**: header row names the fields, blank rows skipped
//! 3. **Normalize**: trim, backfill defaults, drop rows without an ID
//! 4. **Sort**: newest first by date
//! 5. **Cache**: persist to session storage for the TTL window

mod loader;
mod normalize;
mod parser;
mod source;

pub use loader::{LoadOrigin, PostLoader};
pub use normalize::{normalize_row, normalize_rows, IngestReport};
pub use parser::{parse_sheet, SheetRow};
pub use source::{FileSource, HttpSource, PostSource, FETCH_TIMEOUT};
