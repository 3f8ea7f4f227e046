//! Global Git configuration file discovery.
//!
//! Git accepts its user-level configuration from several locations. The
//! locator checks a fixed, ordered list of candidates under the home
//! directory and returns the first one that exists. Resolution happens at
//! most once per locator instance; the process working directory is never
//! touched.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::ConfigError;

/// Candidate configuration files relative to the home directory, in
/// priority order. The first existing entry always wins, regardless of
/// filesystem iteration order.
const CANDIDATES: [&str; 5] = [
    ".gitconfig",
    ".config/git/config",
    ".config/git/.gitconfig",
    ".config/git/gitconfig",
    "git/config",
];

#[cfg(windows)]
const HOME_ENV: &str = "USERPROFILE";
#[cfg(not(windows))]
const HOME_ENV: &str = "HOME";

/// Locates the user-level ("global") Git configuration file.
pub struct ConfigurationLocator {
    home: PathBuf,
    /// Memoized successful resolution. A failed scan is not cached so that
    /// an opt-in creation step (see [`ConfigurationWriter`]) can install
    /// the freshly created default path via [`ConfigurationLocator::install`].
    ///
    /// [`ConfigurationWriter`]: crate::config::ConfigurationWriter
    resolved: RefCell<Option<PathBuf>>,
}

impl ConfigurationLocator {
    /// Create a locator for an explicit home directory.
    pub fn new<P: Into<PathBuf>>(home: P) -> Self {
        Self {
            home: home.into(),
            resolved: RefCell::new(None),
        }
    }

    /// Create a locator using the platform's user-profile environment
    /// variable (`USERPROFILE` on Windows, `HOME` elsewhere).
    pub fn from_env() -> Result<Self, ConfigError> {
        let home = std::env::var(HOME_ENV)
            .map_err(|_| ConfigError::MissingHomeDirectory { var: HOME_ENV })?;
        Ok(Self::new(home))
    }

    /// The home directory this locator searches.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The deterministic path used when a configuration file has to be
    /// created: `<home>/.config/git/config`. No filesystem access.
    pub fn default_path(&self) -> PathBuf {
        self.home.join(".config").join("git").join("config")
    }

    /// Resolve the global configuration file.
    ///
    /// Returns the first existing candidate in priority order, memoized per
    /// instance; repeated calls are idempotent and side-effect-free after
    /// the first successful resolution.
    pub fn resolve(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = self.resolved.borrow().as_ref() {
            return Ok(path.clone());
        }

        for candidate in CANDIDATES {
            let path = self.home.join(candidate);
            if path.is_file() {
                // Windows requires absolute-path normalization (symlink
                // resolution) before the path is handed out.
                let path = if cfg!(windows) {
                    std::fs::canonicalize(&path).unwrap_or(path)
                } else {
                    path
                };
                debug!(path = %path.display(), candidate, "resolved global Git configuration");
                self.resolved.borrow_mut().replace(path.clone());
                return Ok(path);
            }
        }

        Err(ConfigError::NonExistentGlobalConfiguration {
            home: self.home.display().to_string(),
        })
    }

    /// Record a configuration file created out-of-band (the writer's
    /// opt-in default-file creation) so later resolutions see it.
    pub(crate) fn install(&self, path: PathBuf) {
        self.resolved.borrow_mut().replace(path);
    }
}
