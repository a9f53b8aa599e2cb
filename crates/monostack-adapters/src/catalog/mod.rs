//! Catalog storage adapters.
//!
//! Two implementations of the `CatalogStore` port:
//! - [`EmbeddedCatalogStore`] serves the catalog and compose template that
//!   ship with the binary.
//! - [`FileCatalogStore`] reads user-supplied files, with process-lifetime
//!   caching.

pub mod builtin;
pub mod file_store;

pub use builtin::EmbeddedCatalogStore;
pub use file_store::FileCatalogStore;
