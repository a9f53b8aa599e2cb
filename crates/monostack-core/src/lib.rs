//! Monostack Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Monostack
//! full-stack scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         monostack-cli (CLI)             │
//! │     (Prompts, flags, output)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (GenerateService)              │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (CatalogStore, CommandRunner, Filesystem)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    monostack-adapters (Infrastructure)  │
//! │  (FileCatalogStore, ShellRunner, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │  (ModuleKind, SelectionSet, Catalog,    │
//! │   ComposeFile, command/compose render)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use monostack_core::{
//!     application::GenerateService,
//!     domain::{ModuleChoice, ModuleKind, SelectionSet},
//! };
//!
//! // 1. Build the selections (normally gathered interactively)
//! let selections = SelectionSet::new()
//!     .with_module(ModuleKind::Backend, ModuleChoice::new("python", "flask"))
//!     .with_database("postgres");
//!
//! // 2. Use the application service (with injected adapters)
//! let service = GenerateService::new(store, runner, filesystem);
//! let report = service.generate("./my-app".as_ref(), &selections).unwrap();
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Pure rendering logic (install commands, compose documents)
pub mod render;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateService, GenerationReport,
        ports::{CatalogStore, CommandRunner, ExtraGenerator, Filesystem, ProcessOutput},
    };
    pub use crate::domain::{Catalog, ComposeFile, ModuleChoice, ModuleKind, SelectionSet};
    pub use crate::error::{MonostackError, MonostackResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
