//! Pure rendering logic: install commands and compose documents.
//!
//! Nothing in this module performs I/O; everything is a deterministic
//! function of its inputs.

pub mod command;
pub mod compose;

pub use command::render_install_command;
pub use compose::render_compose;
