//! Helper contract and loader.
//!
//! Helpers are the pluggable drivers that perform framework actions (clicking,
//! asserting, calling an API). They are configured by name; the loader
//! resolves each config entry to a [`HelperFactory`], verifies the factory's
//! requirements, constructs the instance with its config payload, and finally
//! runs every init hook once, in construction order.

use std::any::Any;
use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::HelperConfig;
use crate::error::{BoxedError, RegistryError, RegistryResult};
use crate::host::Host;
use crate::store::Store;

/// A constructed helper instance, owned by the registry.
///
/// The init hook is optional (the default is a no-op) and may perform
/// asynchronous work; the loader imposes no timeout on it.
#[async_trait]
pub trait Helper: Send + Sync + Debug {
    /// One-time initialization, invoked after all helpers are constructed
    /// and before any test runs. Failures are fatal to registry creation.
    async fn init(&mut self) -> Result<(), BoxedError> {
        Ok(())
    }

    /// Downcast to the concrete helper type.
    fn as_any(&self) -> &dyn Any;
}

/// Builds [`Helper`] instances from config payloads.
///
/// Factories stand in for the classes a dynamic runtime would `require`:
/// the host holds name → factory tables populated at build time.
pub trait HelperFactory: Send + Sync {
    /// External dependencies this helper needs that are not installed.
    ///
    /// A non-empty list aborts loading before construction with an
    /// [`RegistryError::Installation`] whose message embeds an install
    /// command naming every entry.
    fn missing_requirements(&self) -> Vec<String> {
        Vec::new()
    }

    /// Construct the helper from its config payload.
    fn build(&self, config: Value) -> Result<Box<dyn Helper>, BoxedError>;
}

/// How a helper config entry resolves to a factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleRef {
    /// No `require` field: the name must resolve to a builtin helper.
    Builtin(String),
    /// `require` with a leading `.` (`./` or `../`): a custom helper
    /// resolved relative to the project root.
    Local(String),
    /// Any other `require` value: an installed plugin package.
    Package(String),
}

impl ModuleRef {
    /// Classify a config entry's module reference.
    pub fn resolve(name: &str, require: Option<&str>) -> Self {
        match require {
            Some(path) if path.starts_with('.') => ModuleRef::Local(path.to_string()),
            Some(package) => ModuleRef::Package(package.to_string()),
            None => ModuleRef::Builtin(name.to_string()),
        }
    }

    /// The reference string for error messages.
    pub fn reference(&self) -> &str {
        match self {
            ModuleRef::Builtin(name) => name,
            ModuleRef::Local(path) => path,
            ModuleRef::Package(package) => package,
        }
    }
}

/// Load every configured helper, in config insertion order.
///
/// Construction happens first for all entries, then init hooks run in the
/// same order — later helpers may depend on earlier ones being constructed,
/// though not yet initialized.
pub async fn load(
    configs: &Store<HelperConfig>,
    host: &Host,
) -> RegistryResult<Store<Box<dyn Helper>>> {
    let mut helpers: Store<Box<dyn Helper>> = Store::new();

    for (name, config) in configs.iter() {
        let module = ModuleRef::resolve(name, config.require.as_deref());
        let factory = host.helper_factory(&module).ok_or_else(|| {
            RegistryError::load(name, module.reference(), "module is not registered")
        })?;

        let missing = factory.missing_requirements();
        if !missing.is_empty() {
            return Err(RegistryError::Installation {
                helper: name.to_string(),
                command: host.install_command(&missing),
            });
        }

        let instance = factory
            .build(config.payload.clone())
            .map_err(|e| RegistryError::load(name, module.reference(), e))?;
        debug!(helper = name, reference = module.reference(), "constructed helper");
        helpers.insert(name, instance);
    }

    for name in configs.names() {
        if let Some(helper) = helpers.get_mut(name) {
            helper
                .init()
                .await
                .map_err(|e| RegistryError::initialization(name, e))?;
            debug!(helper = name, "initialized helper");
        }
    }

    Ok(helpers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_ref_builtin_without_require() {
        assert_eq!(
            ModuleRef::resolve("Browser", None),
            ModuleRef::Builtin("Browser".to_string())
        );
    }

    #[test]
    fn test_module_ref_local_with_relative_marker() {
        assert_eq!(
            ModuleRef::resolve("My", Some("./helpers/my")),
            ModuleRef::Local("./helpers/my".to_string())
        );
    }

    #[test]
    fn test_module_ref_local_with_parent_relative_marker() {
        assert_eq!(
            ModuleRef::resolve("Shared", Some("../helpers/shared")),
            ModuleRef::Local("../helpers/shared".to_string())
        );
    }

    #[test]
    fn test_module_ref_package_otherwise() {
        assert_eq!(
            ModuleRef::resolve("Rest", Some("framework-rest-helper")),
            ModuleRef::Package("framework-rest-helper".to_string())
        );
    }
}
