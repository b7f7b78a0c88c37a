//! # minionsuite
//!
//! **minionsuite** scaffolds the boilerplate of an ASP.NET Core CRUD application
//! from a plain C# model class: Entity Framework services, MVC and API
//! controllers, and xUnit tests for both.
//!
//! ## Overview
//!
//! The model file is parsed with tree-sitter's C# grammar. Its properties are
//! classified into a closed set of kinds, the key property is resolved, and each
//! generator renders its files from that metadata.
//!
//! ## Architecture
//!
//! - **[`model`]** - C# parsing, property classification, model metadata
//! - **[`generator`]** - Generator dispatch, the C# emission tree, templates and file output
//! - **[`runtime`]** - Rust renditions of the generated paging, result and service types
//! - **[`cli`]** - The `minionsuite` command line
//! - **[`config`]** - Project defaults from `minionsuite.toml`
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`error`]** - [`ScaffoldError`], the error of every library operation
//!
//! ### Generation Flow
//!
//! ```text
//! CLI args ─ normalize ─ clap ─ Cli ─┬─ usage / help text
//!                                    └─ GeneratorOptions (+ minionsuite.toml)
//!                                         │
//!                                         ▼
//!                          ModelMetadata::load (tree-sitter)
//!                                         │
//!                                         ▼
//!                    Generator::render ─ emit::SourceFile / askama
//!                                         │
//!                                         ▼
//!                              write_files ─ output folder
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! minionsuite servicegen -m Models/Post.cs -ns Blog.Services -o Services -gpm -grm
//! minionsuite apicontroller -m Models/Post.cs -ns Blog.Controllers -o Controllers
//! minionsuite servicegen:test -m Models/Post.cs -ns Blog.Tests -db BlogContext
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use minionsuite::model::ModelMetadata;
//!
//! let meta = ModelMetadata::from_source(
//!     "namespace Blog.Models { public class Category { public int Id { get; set; } public string Name { get; set; } } }",
//! )?;
//! assert_eq!(meta.plural_name(), "Categories");
//! assert!(meta.has_string_property());
//! # Ok::<(), minionsuite::ScaffoldError>(())
//! ```
//!
//! ## Logging
//!
//! Set `MINIONSUITE_LOG_LEVEL` (or `RUST_LOG`) and `MINIONSUITE_LOG_FORMAT`;
//! see [`logging`].

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod model;
pub mod runtime;

pub use error::{Result, ScaffoldError};
pub use generator::{get_generator, Generator, GeneratorKind, GeneratorOptions};
