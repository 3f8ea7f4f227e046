//! gitpersona core library.
//!
//! This crate provides the components for directory-scoped Git committer
//! identities: global configuration discovery, end-of-line-preserving
//! `includeIf` generation, conditional dotfile writing, the persona
//! registry, and the orchestrator that composes them.
//!
//! Everything is single-threaded, synchronous, blocking I/O; one overlay
//! request runs to completion per invocation.

pub mod config;
pub mod eol;
pub mod errors;
pub mod overlay;
pub mod persona;
pub mod repository;

// Re-exports for convenience.
pub use config::{ConfigurationLocator, ConfigurationWriter};
pub use errors::CoreError;
pub use overlay::{ConditionalConfig, OverlayOutcome, OverlayRequest};
pub use persona::{Identity, Persona, PersonaRegistry};
pub use repository::Repository;
