//! Find every declaration of a type in a Rust module and check a list of
//! values against them.
//!
//! - [`scanner`]: [`Scanner`] and [`all`]
//! - [`assert`]: [`no_diff`] and [`assert_no_diff`] for tests

pub mod assert;
pub mod scanner;

pub use assert::{assert_no_diff, no_diff, Harness, TestHarness};
pub use scanner::{all, Scanner};
pub use typedecl_core::{Collection, Declared, Diff, Match, ScanConfig, ScanError};
