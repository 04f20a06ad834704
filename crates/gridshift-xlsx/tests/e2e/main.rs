//! End-to-end tests for gridshift-xlsx.
//!
//! Each test builds the package parts it needs, writes them to a zip archive
//! in a temp directory, reads the archive back and asserts on the parts.

mod common;
mod parts;

pub use common::*;
