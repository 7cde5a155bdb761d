//! Console rendering for the season crawler
//!
//! Output is written to a caller-supplied `std::io::Write` sink rather than
//! straight to stdout, so command output can be captured in tests.

pub mod ranking_table;

pub use ranking_table::write_rankings;
