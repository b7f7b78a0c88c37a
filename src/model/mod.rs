//! # Model Module
//!
//! Turns a C# model class into the [`ModelMetadata`] every generator consumes.
//!
//! ```text
//! Post.cs → parse (tree-sitter) → classify members → resolve key → ModelMetadata
//! ```
//!
//! - [`parse`] walks the syntax tree and collects the first type declaration,
//!   its namespace and its instance members
//! - `property` maps declared type spellings onto the closed [`PropertyKind`] set
//! - [`inflect`] derives the plural type name used for controllers and `DbSet`s
//! - `metadata` ties the three together and enforces key resolution
//!
//! ## Example
//!
//! ```rust
//! use minionsuite::model::ModelMetadata;
//!
//! let meta = ModelMetadata::from_source(
//!     "namespace Blog.Models { public class Post { public int Id { get; set; } public string Title { get; set; } } }",
//! )?;
//! assert_eq!(meta.plural_name(), "Posts");
//! assert_eq!(meta.key_name(), "Id");
//! # Ok::<(), minionsuite::ScaffoldError>(())
//! ```

pub mod inflect;
mod metadata;
pub mod parse;
mod property;

pub use inflect::pluralize;
pub use metadata::ModelMetadata;
pub use property::{PropertyDescriptor, PropertyKind};
