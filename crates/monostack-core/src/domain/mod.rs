//! Domain layer - pure business logic, no I/O.

pub mod catalog;
pub mod compose;
pub mod error;
pub mod module;

pub use catalog::Catalog;
pub use compose::{ComposeFile, DEFAULT_COMPOSE_VERSION};
pub use error::{DomainError, ErrorCategory};
pub use module::{ModuleChoice, ModuleKind, SelectionSet};
