//! Mutation of the global Git configuration and its conditional dotfiles.
//!
//! Two operations only: appending an `includeIf` stanza to the global
//! configuration, and writing a conditional-configuration dotfile holding a
//! `[user]` block. Existing sections are never parsed, merged, or rewritten.
//!
//! Both writes are plain read-modify-write whole-file overwrites with no
//! locking; two invocations racing on the same file can lose one stanza.
//! That limitation is accepted and documented rather than guarded against.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ConfigurationLocator;
use crate::eol;
use crate::errors::ConfigError;
use crate::persona::Identity;

/// Appends `includeIf` stanzas and writes conditional dotfiles next to the
/// resolved global configuration.
pub struct ConfigurationWriter<'a> {
    locator: &'a ConfigurationLocator,
}

impl<'a> ConfigurationWriter<'a> {
    pub fn new(locator: &'a ConfigurationLocator) -> Self {
        Self { locator }
    }

    /// Append an `includeIf` stanza referencing `dotfile_name` for
    /// `directory` to the global configuration.
    ///
    /// When no global configuration exists the call fails with
    /// [`ConfigError::NonExistentGlobalConfiguration`] unless
    /// `create_if_missing` is set, in which case the default configuration
    /// file and its parent directory are created first.
    ///
    /// Non-blank existing content keeps its bytes untouched; the stanza is
    /// appended after exactly one instance of the content's dominant
    /// end-of-line sequence. Blank content gets the stanza with no leading
    /// separator.
    ///
    /// Returns the path of the configuration file that was written.
    pub fn append_include_if(
        &self,
        dotfile_name: &str,
        directory: &str,
        create_if_missing: bool,
    ) -> Result<PathBuf, ConfigError> {
        let configuration_file = match self.locator.resolve() {
            Ok(path) => path,
            Err(ConfigError::NonExistentGlobalConfiguration { .. }) if create_if_missing => {
                self.create_default_configuration_file()?
            }
            Err(e) => return Err(e),
        };

        let stanza = format!("[includeIf \"gitdir:{directory}\"]\n    path = {dotfile_name}");

        let mut content = std::fs::read_to_string(&configuration_file)?;
        if content.trim().is_empty() {
            content.push_str(&stanza);
        } else {
            let preferred_eol = eol::detect(&content);
            debug!(%preferred_eol, "detected end-of-line sequence");
            content.push_str(preferred_eol.as_str());
            content.push_str(&stanza);
        }

        std::fs::write(&configuration_file, content)?;
        info!(
            path = %configuration_file.display(),
            directory,
            "appended includeIf stanza"
        );

        Ok(configuration_file)
    }

    /// Write the conditional-configuration dotfile for `identity` as a
    /// sibling of the resolved global configuration.
    ///
    /// Any existing file at that path is overwritten unconditionally; there
    /// is no merge and no backup. This path never auto-creates the global
    /// configuration.
    ///
    /// Returns the path of the dotfile that was written.
    pub fn write_conditional_dotfile(
        &self,
        dotfile_name: &str,
        identity: &Identity,
    ) -> Result<PathBuf, ConfigError> {
        let configuration_file = self.locator.resolve()?;

        // The resolved path always lives under the home directory, so a
        // parent component exists.
        let dotfile = match configuration_file.parent() {
            Some(parent) => parent.join(dotfile_name),
            None => PathBuf::from(dotfile_name),
        };

        let content = format!(
            "[user]\n    email = {}\n    name = {}",
            identity.email, identity.name
        );

        std::fs::write(&dotfile, content)?;
        info!(path = %dotfile.display(), "wrote conditional configuration dotfile");

        Ok(dotfile)
    }

    /// Create the default configuration file and its parent directory.
    fn create_default_configuration_file(&self) -> Result<PathBuf, ConfigError> {
        let default_file = self.locator.default_path();
        let default_directory = default_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.locator.home().to_path_buf());

        std::fs::create_dir_all(&default_directory).map_err(|_| {
            ConfigError::FailedToCreateDirectory {
                directory: default_directory.display().to_string(),
            }
        })?;

        std::fs::write(&default_file, "").map_err(|_| {
            ConfigError::FailedToCreateDefaultConfigurationFile {
                file: default_file.display().to_string(),
            }
        })?;

        info!(path = %default_file.display(), "created default global Git configuration");
        self.locator.install(default_file.clone());

        Ok(default_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::Identity;

    fn identity() -> Identity {
        Identity {
            name: "John Doe".into(),
            email: "john.doe@example.org".into(),
        }
    }

    #[test]
    fn test_append_to_existing_configuration_preserves_existing_bytes() {
        let home = tempfile::tempdir().unwrap();
        let config = home.path().join(".gitconfig");
        let existing = "[user]\n    name = John Doe\n    email = john.doe@example.org\n[alias]\n    co = checkout";
        std::fs::write(&config, existing).unwrap();

        let locator = ConfigurationLocator::new(home.path());
        let writer = ConfigurationWriter::new(&locator);
        let git_directory = home.path().join("git-repos");
        writer
            .append_include_if(
                ".work-gitconfig",
                &git_directory.display().to_string(),
                false,
            )
            .unwrap();

        let expected = format!(
            "{existing}\n[includeIf \"gitdir:{}\"]\n    path = .work-gitconfig",
            git_directory.display()
        );
        assert_eq!(std::fs::read_to_string(&config).unwrap(), expected);
    }

    #[test]
    fn test_append_preserves_crlf_convention() {
        let home = tempfile::tempdir().unwrap();
        let config = home.path().join(".gitconfig");
        std::fs::write(&config, "[alias]\r\n    co = checkout\r\n    st = status").unwrap();

        let locator = ConfigurationLocator::new(home.path());
        let writer = ConfigurationWriter::new(&locator);
        writer
            .append_include_if(".work-gitconfig", "/repos/work", false)
            .unwrap();

        let content = std::fs::read_to_string(&config).unwrap();
        assert!(content.ends_with(
            "    st = status\r\n[includeIf \"gitdir:/repos/work\"]\n    path = .work-gitconfig"
        ));
    }

    #[test]
    fn test_append_without_configuration_fails_when_creation_not_requested() {
        let home = tempfile::tempdir().unwrap();

        let locator = ConfigurationLocator::new(home.path());
        let writer = ConfigurationWriter::new(&locator);
        let result = writer.append_include_if(".work-gitconfig", "/repos/work", false);
        assert!(matches!(
            result,
            Err(ConfigError::NonExistentGlobalConfiguration { .. })
        ));
    }

    #[test]
    fn test_append_creates_default_configuration_when_requested() {
        let home = tempfile::tempdir().unwrap();

        let locator = ConfigurationLocator::new(home.path());
        let writer = ConfigurationWriter::new(&locator);
        writer
            .append_include_if(".work-gitconfig", "/repos/work", true)
            .unwrap();

        let default_file = locator.default_path();
        assert_eq!(
            std::fs::read_to_string(default_file).unwrap(),
            "[includeIf \"gitdir:/repos/work\"]\n    path = .work-gitconfig"
        );
    }

    #[test]
    fn test_created_default_is_visible_to_later_resolution() {
        let home = tempfile::tempdir().unwrap();

        let locator = ConfigurationLocator::new(home.path());
        let writer = ConfigurationWriter::new(&locator);
        writer
            .append_include_if(".work-gitconfig", "/repos/work", true)
            .unwrap();

        assert_eq!(locator.resolve().unwrap(), locator.default_path());
    }

    #[test]
    fn test_dotfile_content_and_location() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(".gitconfig"), "").unwrap();

        let locator = ConfigurationLocator::new(home.path());
        let writer = ConfigurationWriter::new(&locator);
        let dotfile = writer
            .write_conditional_dotfile(".work-gitconfig", &identity())
            .unwrap();

        assert_eq!(dotfile, home.path().join(".work-gitconfig"));
        assert_eq!(
            std::fs::read_to_string(&dotfile).unwrap(),
            "[user]\n    email = john.doe@example.org\n    name = John Doe"
        );
    }

    #[test]
    fn test_dotfile_is_fully_overwritten() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(".gitconfig"), "").unwrap();

        let locator = ConfigurationLocator::new(home.path());
        let writer = ConfigurationWriter::new(&locator);
        writer
            .write_conditional_dotfile(".work-gitconfig", &identity())
            .unwrap();

        let second = Identity {
            name: "Some One".into(),
            email: "some.one@example.org".into(),
        };
        let dotfile = writer
            .write_conditional_dotfile(".work-gitconfig", &second)
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&dotfile).unwrap(),
            "[user]\n    email = some.one@example.org\n    name = Some One"
        );
    }

    #[test]
    fn test_dotfile_requires_existing_configuration() {
        let home = tempfile::tempdir().unwrap();

        let locator = ConfigurationLocator::new(home.path());
        let writer = ConfigurationWriter::new(&locator);
        let result = writer.write_conditional_dotfile(".work-gitconfig", &identity());
        assert!(matches!(
            result,
            Err(ConfigError::NonExistentGlobalConfiguration { .. })
        ));
    }
}
