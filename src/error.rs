//! Error types for the Testcast registry core.

use thiserror::Error;

/// A boxed error produced inside user-supplied code (support-object methods,
/// factories, init hooks). Testcast never inspects these beyond displaying
/// and chaining them.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while building or mutating the registry.
///
/// Every variant is fatal to [`Container::create`](crate::Container::create):
/// the caller is expected to abort startup rather than retry against partial
/// state. Deferred async failures inside support-object methods are *not*
/// part of this taxonomy; they are routed to the [`Recorder`](crate::Recorder)
/// instead of being raised.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A translation spec named neither a builtin vocabulary nor an existing file.
    #[error("Unable to load translation \"{spec}\": not a builtin vocabulary or a readable file")]
    Configuration {
        /// The offending translation spec string.
        spec: String,
    },

    /// A helper declared missing external dependencies.
    ///
    /// The message carries a ready-to-run install command naming every
    /// missing dependency.
    #[error("Helper \"{helper}\" requires packages that are not installed. Run: {command}")]
    Installation {
        /// Name of the helper whose requirements check failed.
        helper: String,
        /// Install command mentioning every missing dependency.
        command: String,
    },

    /// A helper or support module could not be resolved or constructed.
    #[error("Could not load \"{name}\" from \"{reference}\": {source}")]
    Load {
        /// Config key of the helper or support object.
        name: String,
        /// The module reference that was attempted.
        reference: String,
        #[source]
        source: BoxedError,
    },

    /// A support object's factory, or a helper or support object's init hook, raised.
    #[error("Initialization failed for \"{name}\": {source}")]
    Initialization {
        /// Config key of the failing helper or support object.
        name: String,
        #[source]
        source: BoxedError,
    },

    /// Runner construction failed.
    #[error("Runner construction failed: {0}")]
    Runner(String),
}

impl RegistryError {
    /// Build a [`RegistryError::Load`] from anything convertible to a cause.
    pub fn load(
        name: impl Into<String>,
        reference: impl Into<String>,
        cause: impl Into<BoxedError>,
    ) -> Self {
        RegistryError::Load {
            name: name.into(),
            reference: reference.into(),
            source: cause.into(),
        }
    }

    /// Build a [`RegistryError::Initialization`] from anything convertible to a cause.
    pub fn initialization(name: impl Into<String>, cause: impl Into<BoxedError>) -> Self {
        RegistryError::Initialization {
            name: name.into(),
            source: cause.into(),
        }
    }
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_names_reference_and_cause() {
        let err = RegistryError::load("Db", "./support/db", "module not registered");
        let msg = err.to_string();
        assert!(msg.contains("Db"));
        assert!(msg.contains("./support/db"));
        assert!(msg.contains("module not registered"));
    }

    #[test]
    fn test_installation_error_embeds_command() {
        let err = RegistryError::Installation {
            helper: "Browser".to_string(),
            command: "cargo add --dev webdriver gecko".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Browser"));
        assert!(msg.contains("cargo add --dev webdriver gecko"));
    }

    #[test]
    fn test_configuration_error_names_spec() {
        let err = RegistryError::Configuration {
            spec: "xx-YY".to_string(),
        };
        assert!(err.to_string().contains("xx-YY"));
    }
}
