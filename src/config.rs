//! Framework configuration consumed by registry creation.
//!
//! The shapes here mirror the inputs of the host framework's config file:
//! a `helpers` section (name → module reference + payload), an `include`
//! section (name → support entry), a translation spec, an opaque runner
//! payload, and a grep pattern.

use serde_json::Value;

use crate::store::Store;
use crate::support::SupportEntry;

/// A single helper config entry.
///
/// Without a `require` reference the name must resolve to a builtin helper;
/// a reference with a leading `.` names a custom helper under the project
/// root; anything else names an installed plugin package.
#[derive(Debug, Clone, Default)]
pub struct HelperConfig {
    /// Explicit module reference, if any.
    pub require: Option<String>,
    /// Arbitrary configuration payload handed to the helper's constructor.
    pub payload: Value,
}

impl HelperConfig {
    /// An entry with no module reference and an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the module reference.
    pub fn with_require(mut self, reference: impl Into<String>) -> Self {
        self.require = Some(reference.into());
        self
    }

    /// Set the configuration payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

/// The framework configuration handed to [`Container::create`](crate::Container::create).
#[derive(Debug, Default)]
pub struct Config {
    /// Helper name → config entry, in declaration order.
    pub helpers: Store<HelperConfig>,
    /// Support-object name → entry.
    pub include: Store<SupportEntry>,
    /// Translation spec: a builtin vocabulary name or a file path.
    pub translation: Option<String>,
    /// Opaque payload forwarded to the runner builder.
    pub mocha: Value,
    /// Test-name filter pattern.
    pub grep: Option<String>,
}

impl Config {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a helper entry.
    pub fn with_helper(mut self, name: impl Into<String>, config: HelperConfig) -> Self {
        self.helpers.insert(name, config);
        self
    }

    /// Add a support-object entry.
    pub fn with_support(mut self, name: impl Into<String>, entry: SupportEntry) -> Self {
        self.include.insert(name, entry);
        self
    }

    /// Set the translation spec.
    pub fn with_translation(mut self, spec: impl Into<String>) -> Self {
        self.translation = Some(spec.into());
        self
    }

    /// Set the opaque runner payload.
    pub fn with_mocha(mut self, payload: Value) -> Self {
        self.mocha = payload;
        self
    }

    /// Set the grep pattern.
    pub fn with_grep(mut self, pattern: impl Into<String>) -> Self {
        self.grep = Some(pattern.into());
        self
    }
}

/// Options for a single `create` call.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Explicit grep override; takes precedence over the config's pattern.
    pub grep: Option<String>,
}

impl CreateOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the grep pattern for this run.
    pub fn with_grep(mut self, pattern: impl Into<String>) -> Self {
        self.grep = Some(pattern.into());
        self
    }
}
