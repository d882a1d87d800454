//! Output module for serializing precinct records
//!
//! One header line followed by one `;`-delimited line per precinct, written
//! through any `io::Write` sink (stdout, a file, or a test buffer).

mod emitter;

pub use emitter::RecordEmitter;
