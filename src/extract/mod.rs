//! Table extraction for precinct-commission result pages
//!
//! This module turns the fixed-schema results table on a leaf page into
//! per-precinct records. It is pure: no I/O, no retry, no logging decisions.

mod table;

pub use table::{extract_precincts, PrecinctRecord, TableStructureError};
