//! The runner collaborator.
//!
//! Runner construction is delegated: the registry forwards the opaque runner
//! payload and grep pattern to a [`RunnerBuilder`] and stores whatever comes
//! back. Nothing in this core inspects the instance beyond holding it.

use std::any::Any;
use std::fmt::Debug;

use serde_json::Value;

use crate::config::CreateOptions;
use crate::error::BoxedError;

/// An opaque test-runner instance, owned by the registry.
pub trait Runner: Send + Sync + Debug {
    /// Downcast to the concrete runner type.
    fn as_any(&self) -> &dyn Any;
}

/// Constructs the runner during registry creation.
pub trait RunnerBuilder: Send + Sync {
    /// Build a runner from the forwarded config and creation options.
    fn build(&self, config: RunnerConfig, opts: &CreateOptions)
        -> Result<Box<dyn Runner>, BoxedError>;
}

/// Configuration forwarded opaquely to the runner builder.
///
/// `grep` is populated from the framework config's grep pattern when the
/// creation options do not override it.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Opaque runner payload (the framework config's `mocha` section).
    pub payload: Value,
    /// Test-name filter pattern, if any.
    pub grep: Option<String>,
}

/// Default runner used when the host has no builder registered: holds the
/// forwarded config and does nothing.
#[derive(Debug)]
pub struct NoopRunner {
    config: RunnerConfig,
}

impl NoopRunner {
    /// The config this runner was built with.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }
}

impl Runner for NoopRunner {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builder for [`NoopRunner`].
#[derive(Debug, Default)]
pub struct NoopRunnerBuilder;

impl RunnerBuilder for NoopRunnerBuilder {
    fn build(
        &self,
        config: RunnerConfig,
        _opts: &CreateOptions,
    ) -> Result<Box<dyn Runner>, BoxedError> {
        Ok(Box::new(NoopRunner { config }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_builder_keeps_forwarded_config() {
        let config = RunnerConfig {
            payload: serde_json::json!({"reporter": "dot"}),
            grep: Some("smoke".to_string()),
        };
        let runner = NoopRunnerBuilder
            .build(config, &CreateOptions::default())
            .unwrap();

        let noop = runner.as_any().downcast_ref::<NoopRunner>().unwrap();
        assert_eq!(noop.config().grep.as_deref(), Some("smoke"));
        assert_eq!(noop.config().payload["reporter"], "dot");
    }
}
