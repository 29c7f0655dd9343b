//! LightConvert Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Converts raw recommendation datasets into typed, tab-separated relation
//! files: `<name>.inter` (interactions), `<name>.item` and `<name>.user`.
//! Every file starts with a `name:type` header where type is one of
//! `token`, `float` or `token_seq`.
//!
//! # Overview
//!
//! - **Registry**: dataset name to loader family and accepted options
//! - **Loaders**: MovieLens (100K/1M, 10M/20M/32M) and Amazon Reviews 2023
//! - **Reshapes**: title/year split, genre collapse, date conversion
//! - **Projector**: field mapping to atomic TSV output
//!
//! # Example
//!
//! ```no_run
//! use lightconvert::loaders::{build_loader, DatasetPaths, LoaderOptions};
//! use lightconvert::registry::resolve;
//! use lightconvert::schema::Relation;
//!
//! fn main() -> lightconvert::Result<()> {
//!     let resolved = resolve("ml-100k")?;
//!     let paths = DatasetPaths::new("raw/ml-100k", "atomic/ml-100k")?;
//!     let loader = build_loader(&resolved, paths, &LoaderOptions::default())?;
//!     loader.convert(Relation::Interaction)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod loaders;
pub mod progress;
pub mod projector;
pub mod reader;
pub mod registry;
pub mod reshape;
pub mod schema;
pub mod table;

// Re-export commonly used types
pub use cli::{run, Cli, RunSummary};
pub use error::{ConvertError, Result};
pub use loaders::{build_loader, DatasetLoader, DatasetPaths, LoaderOptions};
pub use schema::{Field, FieldMapping, FieldType, Relation};
pub use table::Table;
