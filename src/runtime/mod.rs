//! # Runtime Module
//!
//! Rust counterparts of the runtime types the generated C# code relies on.
//!
//! - [`PageModel`] - one clamped page of an ordered collection, with the
//!   paging state that produced it
//! - [`ResultModel`] - success-or-errors outcome of a create or update
//! - [`CrudService`] - in-memory service composed from a [`SortPolicy`] and a
//!   [`SearchPolicy`], returning the two types above
//!
//! Semantics match the emitted `PageModel.cs` and `ResultModel.cs`: pages are
//! clamped before slicing, and success is derived from the error list.

mod page;
mod result;
mod service;


pub use page::{PageModel, PageSource};
pub use result::ResultModel;
pub use service::{
    ContainsSearch, CrudService, Entity, FieldSort, SearchPolicy, SortPolicy,
    DUPLICATE_KEY_MESSAGE, NOT_FOUND_MESSAGE,
};
