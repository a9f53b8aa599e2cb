//! Application layer - use-case orchestration over the domain.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::{GenerateOptions, GenerateService, GenerationReport};
