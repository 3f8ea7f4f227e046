//! JSON-backed persona registry.
//!
//! The storage format is a JSON array of persona objects:
//!
//! ```json
//! [{"alias":"jd","name":"John Doe","email":"john.doe@example.org","usage_frequency":11}]
//! ```
//!
//! The registry is read once per invocation; concurrent writers must
//! serialize their own updates.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::PersonaError;
use crate::persona::Persona;

/// An ordered collection of personas backed by a single JSON file.
pub struct PersonaRegistry {
    path: PathBuf,
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// File name of the storage file under the home directory.
    pub const FILE_NAME: &'static str = ".gitpersonas.json";

    /// Default storage location: `<home>/.gitpersonas.json`.
    pub fn default_storage_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(Self::FILE_NAME))
    }

    /// Load the registry from `path`. A missing or blank file yields an
    /// empty registry; a present but malformed file is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PersonaError> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "no persona storage file, starting empty");
            return Ok(Self {
                path: path.to_path_buf(),
                personas: Vec::new(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let personas = if contents.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&contents)
                .map_err(|e| PersonaError::ParseError(e.to_string()))?
        };

        debug!(path = %path.display(), count = personas.len(), "loaded personas");
        Ok(Self {
            path: path.to_path_buf(),
            personas,
        })
    }

    /// Persist the registry back to its storage file.
    pub fn save(&self) -> Result<(), PersonaError> {
        let json = serde_json::to_string_pretty(&self.personas)
            .map_err(|e| PersonaError::ParseError(e.to_string()))?;
        std::fs::write(&self.path, json)?;

        info!(path = %self.path.display(), count = self.personas.len(), "saved personas");
        Ok(())
    }

    /// The storage file backing this registry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All personas in storage order.
    pub fn all(&self) -> &[Persona] {
        &self.personas
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Look up a persona by exact, case-sensitive alias.
    ///
    /// Fails with [`PersonaError::NoPersonasDefined`] on an empty registry
    /// and [`PersonaError::UnknownAlias`] otherwise.
    pub fn find_by_alias(&self, alias: &str) -> Result<&Persona, PersonaError> {
        if self.personas.is_empty() {
            return Err(PersonaError::NoPersonasDefined);
        }

        self.personas
            .iter()
            .find(|persona| persona.alias == alias)
            .ok_or_else(|| PersonaError::UnknownAlias {
                alias: alias.to_string(),
            })
    }

    /// Personas ranked by usage frequency, most used first. Storage order
    /// breaks ties (stable sort).
    pub fn ranked(&self) -> Vec<&Persona> {
        let mut ranked: Vec<&Persona> = self.personas.iter().collect();
        ranked.sort_by(|a, b| b.usage_frequency.cmp(&a.usage_frequency));
        ranked
    }

    /// Add a persona, enforcing alias uniqueness.
    pub fn add(&mut self, persona: Persona) -> Result<(), PersonaError> {
        if persona.alias.trim().is_empty() {
            return Err(PersonaError::InvalidAlias);
        }
        if self.personas.iter().any(|p| p.alias == persona.alias) {
            return Err(PersonaError::DuplicateAlias {
                alias: persona.alias,
            });
        }

        self.personas.push(persona);
        Ok(())
    }

    /// Remove the persona with the given alias, returning it.
    pub fn remove(&mut self, alias: &str) -> Result<Persona, PersonaError> {
        if self.personas.is_empty() {
            return Err(PersonaError::NoPersonasDefined);
        }

        match self.personas.iter().position(|p| p.alias == alias) {
            Some(index) => Ok(self.personas.remove(index)),
            None => Err(PersonaError::UnknownAlias {
                alias: alias.to_string(),
            }),
        }
    }

    /// Bump the usage counter of the persona with the given alias and
    /// return the new value. Does not persist; call [`save`](Self::save).
    pub fn increment_usage(&mut self, alias: &str) -> Result<u64, PersonaError> {
        if self.personas.is_empty() {
            return Err(PersonaError::NoPersonasDefined);
        }

        let persona = self
            .personas
            .iter_mut()
            .find(|p| p.alias == alias)
            .ok_or_else(|| PersonaError::UnknownAlias {
                alias: alias.to_string(),
            })?;

        persona.usage_frequency += 1;
        Ok(persona.usage_frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[{"alias":"jd","name":"John Doe","email":"john.doe@example.org","usage_frequency":11},
 {"alias":"so","name":"Some One","email":"some.one@example.org","usage_frequency":23}]"#;

    fn sample_registry() -> (tempfile::TempDir, PersonaRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PersonaRegistry::FILE_NAME);
        std::fs::write(&path, SAMPLE).unwrap();
        let registry = PersonaRegistry::load(&path).unwrap();
        (dir, registry)
    }

    #[test]
    fn test_load_keeps_storage_order() {
        let (_dir, registry) = sample_registry();
        let aliases: Vec<&str> = registry.all().iter().map(|p| p.alias.as_str()).collect();
        assert_eq!(aliases, ["jd", "so"]);
    }

    #[test]
    fn test_load_missing_file_yields_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        let registry = PersonaRegistry::load(dir.path().join("absent.json")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_blank_file_yields_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PersonaRegistry::FILE_NAME);
        std::fs::write(&path, "  \n").unwrap();
        let registry = PersonaRegistry::load(&path).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PersonaRegistry::FILE_NAME);
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            PersonaRegistry::load(&path),
            Err(PersonaError::ParseError(_))
        ));
    }

    #[test]
    fn test_find_by_alias_is_case_sensitive() {
        let (_dir, registry) = sample_registry();
        assert_eq!(registry.find_by_alias("jd").unwrap().name, "John Doe");
        assert!(matches!(
            registry.find_by_alias("JD"),
            Err(PersonaError::UnknownAlias { .. })
        ));
    }

    #[test]
    fn test_find_distinguishes_empty_registry_from_unknown_alias() {
        let dir = tempfile::tempdir().unwrap();
        let registry = PersonaRegistry::load(dir.path().join("absent.json")).unwrap();
        assert!(matches!(
            registry.find_by_alias("jd"),
            Err(PersonaError::NoPersonasDefined)
        ));

        let (_dir, registry) = sample_registry();
        assert!(matches!(
            registry.find_by_alias("jo"),
            Err(PersonaError::UnknownAlias { .. })
        ));
    }

    #[test]
    fn test_ranked_orders_by_usage_descending() {
        let (_dir, registry) = sample_registry();
        let aliases: Vec<&str> = registry.ranked().iter().map(|p| p.alias.as_str()).collect();
        assert_eq!(aliases, ["so", "jd"]);
    }

    #[test]
    fn test_add_enforces_alias_uniqueness() {
        let (_dir, mut registry) = sample_registry();
        let result = registry.add(Persona::new("jd", "Other", "other@example.org"));
        assert!(matches!(result, Err(PersonaError::DuplicateAlias { .. })));
    }

    #[test]
    fn test_add_rejects_blank_alias() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = PersonaRegistry::load(dir.path().join("absent.json")).unwrap();
        let result = registry.add(Persona::new("  ", "Name", "mail@example.org"));
        assert!(matches!(result, Err(PersonaError::InvalidAlias)));
    }

    #[test]
    fn test_remove_unknown_alias() {
        let (_dir, mut registry) = sample_registry();
        assert!(matches!(
            registry.remove("jo"),
            Err(PersonaError::UnknownAlias { .. })
        ));
        assert_eq!(registry.remove("jd").unwrap().alias, "jd");
        assert_eq!(registry.all().len(), 1);
    }

    #[test]
    fn test_increment_usage_and_save_round_trip() {
        let (_dir, mut registry) = sample_registry();
        assert_eq!(registry.increment_usage("jd").unwrap(), 12);
        registry.save().unwrap();

        let reloaded = PersonaRegistry::load(registry.path()).unwrap();
        assert_eq!(reloaded.find_by_alias("jd").unwrap().usage_frequency, 12);
    }
}
