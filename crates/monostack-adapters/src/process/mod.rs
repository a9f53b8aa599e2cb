//! Process execution adapters.

pub mod scripted;
pub mod shell;

pub use scripted::ScriptedRunner;
pub use shell::ShellRunner;
