//! Conditional-configuration orchestration.
//!
//! Drives one overlay request end to end:
//!
//! 1. Guard the persona alias (must not be blank).
//! 2. Guard the conditional configuration name (length, emptiness, numeric).
//! 3. Resolve the persona from the registry.
//! 4. Append the `includeIf` stanza to the global configuration.
//! 5. Write the conditional dotfile next to it.
//!
//! The two writes are sequential and not transactional: if the dotfile write
//! fails after the stanza was appended, the global configuration keeps a
//! stanza pointing at a file that does not exist. Nothing is rolled back.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{ConfigurationLocator, ConfigurationWriter};
use crate::errors::{OverlayError, PersonaError};
use crate::persona::{Identity, PersonaRegistry};

/// Maximum length of a conditional configuration name, in bytes.
pub const MAX_CONDITIONAL_NAME_LENGTH: usize = 20;

/// One overlay request, already parsed by the CLI layer.
///
/// The configuration name is used verbatim as the dotfile name; a missing
/// leading `.` is not normalized.
pub struct OverlayRequest<'a> {
    /// Alias of the persona to project into the overlay.
    pub alias: &'a str,
    /// Name of the conditional configuration dotfile.
    pub configuration_name: &'a str,
    /// The Git directory the `includeIf` condition matches on.
    pub directory: &'a Path,
    /// Create the global configuration file when none exists.
    pub create_global_config: bool,
}

/// Paths produced by a successful overlay.
pub struct OverlayOutcome {
    pub global_configuration: PathBuf,
    pub dotfile: PathBuf,
    pub identity: Identity,
}

/// Composes registry, locator, and writer into the overlay operation.
pub struct ConditionalConfig<'a> {
    registry: &'a mut PersonaRegistry,
    locator: &'a ConfigurationLocator,
}

impl<'a> ConditionalConfig<'a> {
    pub fn new(registry: &'a mut PersonaRegistry, locator: &'a ConfigurationLocator) -> Self {
        Self { registry, locator }
    }

    /// Validate the request, resolve the persona, and produce the overlay.
    ///
    /// Any failure is surfaced unmodified; a failure between the two writes
    /// leaves the partially-applied state in place.
    pub fn apply(&mut self, request: &OverlayRequest<'_>) -> Result<OverlayOutcome, OverlayError> {
        let alias = guard_alias(request.alias)?;
        let name = guard_conditional_configuration_name(request.configuration_name)?;

        let identity = self.registry.find_by_alias(alias)?.identity();
        info!(alias, name, directory = %request.directory.display(), "applying conditional configuration");

        let writer = ConfigurationWriter::new(self.locator);
        let global_configuration = writer.append_include_if(
            name,
            &request.directory.display().to_string(),
            request.create_global_config,
        )?;
        let dotfile = writer.write_conditional_dotfile(name, &identity)?;

        // Usage bookkeeping is best-effort: the overlay itself is complete,
        // so a storage hiccup here must not fail the invocation.
        let bumped = self
            .registry
            .increment_usage(alias)
            .and_then(|_| self.registry.save());
        if let Err(e) = bumped {
            warn!(alias, error = %e, "failed to persist persona usage counter");
        }

        Ok(OverlayOutcome {
            global_configuration,
            dotfile,
            identity,
        })
    }
}

/// Reject a blank persona alias.
fn guard_alias(alias: &str) -> Result<&str, PersonaError> {
    if alias.trim().is_empty() {
        return Err(PersonaError::InvalidAlias);
    }
    Ok(alias)
}

/// Validate a conditional configuration name.
///
/// Checks run in a fixed order so a given offending input always reports the
/// same rule: length first, then emptiness, then the numeric check. A
/// too-long numeric string therefore reports the length error.
pub fn guard_conditional_configuration_name(name: &str) -> Result<&str, OverlayError> {
    if name.len() > MAX_CONDITIONAL_NAME_LENGTH {
        return Err(OverlayError::InvalidConditionalConfigurationName(format!(
            "The provided configuration name '{name}' is longer than \
             '{MAX_CONDITIONAL_NAME_LENGTH}' characters."
        )));
    }

    if name.trim().is_empty() {
        return Err(OverlayError::InvalidConditionalConfigurationName(
            "The provided configuration name is empty.".to_string(),
        ));
    }

    if is_numeric(name.trim()) {
        return Err(OverlayError::InvalidConditionalConfigurationName(
            "The provided configuration name is a number.".to_string(),
        ));
    }

    Ok(name)
}

/// Whether the whole string reads as a finite number. Word-shaped float
/// spellings (`inf`, `infinity`, `NaN`) are legitimate names, not numbers.
fn is_numeric(value: &str) -> bool {
    value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}
