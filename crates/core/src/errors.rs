//! Error types for the gitpersona core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them all for callers that want a
//! single error type.
//!
//! Every error is terminal for the current invocation; nothing is retried
//! internally. Each carries the offending path, name, or alias so the CLI
//! can render a single `Error: <message>` line.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persona(#[from] PersonaError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// ---------------------------------------------------------------------------
// Global Git configuration errors
// ---------------------------------------------------------------------------

/// Errors from locating, creating, or writing the global Git configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No candidate configuration file exists under the home directory.
    #[error("No global Git configuration present in '{home}'.")]
    NonExistentGlobalConfiguration { home: String },

    /// Creating the default configuration's parent directory failed.
    #[error("Failed to create directory '{directory}'.")]
    FailedToCreateDirectory { directory: String },

    /// Creating the empty default configuration file failed.
    #[error("Failed to create default Git configuration file '{file}'.")]
    FailedToCreateDefaultConfigurationFile { file: String },

    /// The home-directory environment variable is not set.
    #[error("The home directory environment variable '{var}' is not set.")]
    MissingHomeDirectory { var: &'static str },

    /// Generic I/O wrapper for reads/writes of configuration files.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Persona registry errors
// ---------------------------------------------------------------------------

/// Errors from the persona registry and its storage file.
#[derive(Debug, Error)]
pub enum PersonaError {
    /// The registry holds no personas at all. Distinct from
    /// [`PersonaError::UnknownAlias`] so callers can tell "nothing
    /// configured" apart from "wrong name".
    #[error("There are no defined personas.")]
    NoPersonasDefined,

    /// No persona matches the given alias (exact, case-sensitive).
    #[error("No known persona for alias '{alias}'.")]
    UnknownAlias { alias: String },

    /// A persona with this alias already exists in the registry.
    #[error("A persona with alias '{alias}' already exists.")]
    DuplicateAlias { alias: String },

    /// The provided alias is blank.
    #[error("The provided persona alias is empty.")]
    InvalidAlias,

    /// The storage file could not be parsed as a JSON persona array.
    #[error("persona storage parse error: {0}")]
    ParseError(String),

    /// Generic I/O wrapper for reads/writes of the storage file.
    #[error("persona storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Overlay orchestration errors
// ---------------------------------------------------------------------------

/// Errors from the conditional-configuration orchestrator.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// The conditional configuration name failed validation. The message
    /// names the first failing rule in length → empty → numeric order.
    #[error("{0}")]
    InvalidConditionalConfigurationName(String),

    /// Underlying configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying persona error.
    #[error(transparent)]
    Persona(#[from] PersonaError),

    /// Underlying repository error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// ---------------------------------------------------------------------------
// Repository errors
// ---------------------------------------------------------------------------

/// Errors from the target-repository guard.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The target directory does not exist.
    #[error("The directory {directory} doesn't exist.")]
    DirectoryNotFound { directory: String },

    /// The target directory exists but is not a Git working directory.
    #[error("No Git repository in {directory}.")]
    NotARepository { directory: String },
}
