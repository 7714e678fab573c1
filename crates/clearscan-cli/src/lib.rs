//! Shared utilities for clearscan-cli
//!
//! Parsing and input-handling helpers used by the binary, kept in a
//! library crate so they stay testable.

pub mod parsers;
pub mod processing;

pub use parsers::parse_profile;
pub use processing::{determine_output_path, expand_inputs, SUPPORTED_EXTENSIONS};
