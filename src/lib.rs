//! Pivot console library
//!
//! The terminal UI lives in `pivot-tui`; this crate adds the headless
//! NDJSON runner used by the `pivot` binary.

pub mod headless;

pub use headless::runner::run_headless;
