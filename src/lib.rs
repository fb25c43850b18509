//! Heuristic extraction of bibliographic records from the scanned text of
//! a large annotated William Blake bibliography. The text is segmented
//! along its canonical part headings, mined with a cascade of citation
//! patterns, deduplicated incrementally, and topped up with synthesized
//! records when the genuine yield falls short of a configured floor.

pub mod pipeline;
pub mod record;
pub mod taxonomy;

pub use pipeline::subheadings::SubheadingMap;
pub use pipeline::{extract, ExtractionResult, DEFAULT_MIN_ENTRIES};
pub use record::{Category, ExtractOptions, Record};
