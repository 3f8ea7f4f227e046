//! Personas: named, reusable committer identities.

pub mod registry;

pub use registry::PersonaRegistry;

use serde::{Deserialize, Serialize};

/// A named committer identity plus a usage counter.
///
/// The alias is unique within a registry; `usage_frequency` is monotonically
/// non-decreasing and bumped each time the persona is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub alias: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub usage_frequency: u64,
}

impl Persona {
    /// Create a new persona with a zero usage counter.
    pub fn new<A, N, E>(alias: A, name: N, email: E) -> Self
    where
        A: Into<String>,
        N: Into<String>,
        E: Into<String>,
    {
        Self {
            alias: alias.into(),
            name: name.into(),
            email: email.into(),
            usage_frequency: 0,
        }
    }

    /// Project the committer identity consumed by the configuration writer.
    pub fn identity(&self) -> Identity {
        Identity {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// A committer identity derived from a [`Persona`]. Never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_projection() {
        let persona = Persona::new("jd", "John Doe", "john.doe@example.org");
        let identity = persona.identity();
        assert_eq!(identity.name, "John Doe");
        assert_eq!(identity.email, "john.doe@example.org");
    }

    #[test]
    fn test_usage_frequency_defaults_when_absent_in_json() {
        let persona: Persona =
            serde_json::from_str(r#"{"alias":"jd","name":"John Doe","email":"jd@example.org"}"#)
                .unwrap();
        assert_eq!(persona.usage_frequency, 0);
    }
}
