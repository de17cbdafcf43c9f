//! Locale vocabularies and the translation loader.
//!
//! A [`Translation`] maps localized action names to the canonical names the
//! helpers understand, and names the locale's actor alias (`Je`, `Ich`, ...).
//! The loader resolves a translation spec — absent, a builtin vocabulary
//! name, or a path to a JSON file under the project root — into a validated
//! `Translation`. Nothing is cached: every `create`/`clear` re-resolves.

use std::collections::HashMap;
use std::fs;

use serde::Deserialize;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::host::Host;

/// Default actor alias when no translation is active.
pub const DEFAULT_ACTOR_ALIAS: &str = "I";

/// An immutable locale vocabulary.
///
/// File-backed translations deserialize from JSON of the shape
/// `{"I": "Je", "vocabulary": {"clique": "click"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    /// The conventional actor alias in this locale.
    #[serde(rename = "I", default = "default_alias")]
    actor_alias: String,
    /// Localized action name → canonical action name.
    #[serde(default)]
    vocabulary: HashMap<String, String>,
    /// False only for the sentinel returned when no translation is configured.
    #[serde(skip, default = "default_real")]
    real: bool,
}

fn default_alias() -> String {
    DEFAULT_ACTOR_ALIAS.to_string()
}

fn default_real() -> bool {
    true
}

impl Translation {
    /// Build a vocabulary for a locale.
    pub fn new(actor_alias: impl Into<String>, vocabulary: HashMap<String, String>) -> Self {
        Self {
            actor_alias: actor_alias.into(),
            vocabulary,
            real: true,
        }
    }

    /// The "no real translation" sentinel: alias `I`, empty vocabulary.
    ///
    /// Downstream alias logic must not duplicate the default actor when this
    /// sentinel is active, so it is distinguishable via [`Translation::is_real`].
    pub fn none() -> Self {
        Self {
            actor_alias: DEFAULT_ACTOR_ALIAS.to_string(),
            vocabulary: HashMap::new(),
            real: false,
        }
    }

    /// The actor alias in this locale.
    pub fn actor_alias(&self) -> &str {
        &self.actor_alias
    }

    /// Whether this is a configured vocabulary rather than the sentinel.
    pub fn is_real(&self) -> bool {
        self.real
    }

    /// Map a localized action name to its canonical name.
    ///
    /// Unknown names pass through unchanged.
    pub fn translate<'a>(&'a self, action: &'a str) -> &'a str {
        self.vocabulary
            .get(action)
            .map(|s| s.as_str())
            .unwrap_or(action)
    }

    /// Localized names that map to a canonical action name.
    pub fn localized_names<'a>(&'a self, canonical: &'a str) -> impl Iterator<Item = &'a str> {
        self.vocabulary
            .iter()
            .filter(move |(_, target)| target.as_str() == canonical)
            .map(|(localized, _)| localized.as_str())
    }

    /// Number of localized action names in the vocabulary.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check if the vocabulary has no entries.
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// Resolve a translation spec into a [`Translation`].
///
/// Resolution order:
/// 1. `None` → the sentinel from [`Translation::none`].
/// 2. A builtin vocabulary name registered on the host.
/// 3. A path to an existing JSON file, resolved against the host's project root.
/// 4. Anything else fails with [`RegistryError::Configuration`] naming the spec.
pub fn load(spec: Option<&str>, host: &Host) -> RegistryResult<Translation> {
    let Some(spec) = spec else {
        return Ok(Translation::none());
    };

    if let Some(builtin) = host.builtin_translation(spec) {
        debug!(locale = spec, "loaded builtin translation");
        return Ok(builtin.clone());
    }

    let path = host.project_root().join(spec);
    if path.is_file() {
        let raw = fs::read_to_string(&path).map_err(|_| RegistryError::Configuration {
            spec: spec.to_string(),
        })?;
        let translation: Translation =
            serde_json::from_str(&raw).map_err(|_| RegistryError::Configuration {
                spec: spec.to_string(),
            })?;
        debug!(file = %path.display(), "loaded translation from file");
        return Ok(translation);
    }

    Err(RegistryError::Configuration {
        spec: spec.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        let t = Translation::none();
        assert_eq!(t.actor_alias(), "I");
        assert!(!t.is_real());
        assert!(t.is_empty());
    }

    #[test]
    fn test_translate_passthrough_for_unknown() {
        let mut vocab = HashMap::new();
        vocab.insert("clique".to_string(), "click".to_string());
        let t = Translation::new("Je", vocab);

        assert_eq!(t.translate("clique"), "click");
        assert_eq!(t.translate("see"), "see");
        assert!(t.is_real());
    }

    #[test]
    fn test_deserialize_from_json() {
        let t: Translation =
            serde_json::from_str(r#"{"I": "Ich", "vocabulary": {"klicke": "click"}}"#).unwrap();
        assert_eq!(t.actor_alias(), "Ich");
        assert_eq!(t.translate("klicke"), "click");
        assert!(t.is_real());
    }

    #[test]
    fn test_deserialize_defaults() {
        let t: Translation = serde_json::from_str("{}").unwrap();
        assert_eq!(t.actor_alias(), "I");
        assert!(t.is_empty());
        // A file that parses is a configured translation even when sparse.
        assert!(t.is_real());
    }
}
