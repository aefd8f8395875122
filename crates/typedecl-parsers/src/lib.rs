//! Tree-sitter front end for typedecl.
//!
//! - [`frontend`]: the [`ModuleLoader`](frontend::ModuleLoader) contract and
//!   the module description it produces
//! - [`treesitter`]: syntax extraction from a tree-sitter parse
//! - [`rust_lang`]: [`RustFrontend`](rust_lang::RustFrontend): module
//!   location, `use` resolution, and type qualification for Rust sources

pub mod frontend;
pub mod queries;
pub mod rust_lang;
pub mod treesitter;

pub use frontend::{LoadedModule, ModuleLoader};
pub use rust_lang::RustFrontend;
