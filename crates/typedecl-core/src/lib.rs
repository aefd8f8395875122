//! Core types, value encoding, and diffing for typedecl.
//!
//! This crate provides the data structures shared by all typedecl crates:
//! - [`types`]: [`Match`], [`Collection`], and [`Diff`]
//! - [`encode`]: the [`Declared`] trait and canonical value encoding
//! - [`diff`]: comparing a [`Collection`] with runtime values
//! - [`error`]: the [`ScanError`] taxonomy
//! - [`config`]: scanner configuration loaded from `typedecl.json`

pub mod config;
pub mod diff;
pub mod encode;
pub mod error;
pub mod types;

pub use config::{ScanConfig, UnsupportedPolicy};
pub use encode::{canonical, Declared, Identifier};
pub use error::ScanError;
pub use types::{Collection, Diff, Match};
