//! The registry facade.
//!
//! A [`Container`] owns the four state fields — helpers, support objects,
//! the active translation, and the runner — and is the single lookup point
//! for every later test-execution phase. It is an explicit owned struct:
//! tests can build as many independent containers as they like, with no
//! process-wide side effects.

use std::sync::Arc;

use tracing::debug;

use crate::config::{Config, CreateOptions};
use crate::error::{RegistryError, RegistryResult};
use crate::helper::{self, Helper};
use crate::host::Host;
use crate::recorder::Recorder;
use crate::runner::{Runner, RunnerConfig};
use crate::store::Store;
use crate::support::{self, Intercepted, SupportObject};
use crate::translation::{self, Translation};

/// The assembled service registry.
#[derive(Debug)]
pub struct Container {
    helpers: Store<Box<dyn Helper>>,
    support: Store<Arc<Intercepted>>,
    translation: Translation,
    runner: Box<dyn Runner>,
    recorder: Arc<dyn Recorder>,
}

impl Container {
    /// Build a registry from the framework config.
    ///
    /// Load order: translation first (the support loader needs the actor
    /// alias), then runner construction, then helpers, then support objects.
    /// Any failure is fatal; no partially built container is ever returned.
    pub async fn create(
        config: Config,
        opts: CreateOptions,
        host: &Host,
    ) -> RegistryResult<Self> {
        let translation = translation::load(config.translation.as_deref(), host)?;

        let mut runner_config = RunnerConfig {
            payload: config.mocha,
            grep: None,
        };
        // The config's grep pattern applies unless an explicit option overrides it.
        if opts.grep.is_none() {
            runner_config.grep = config.grep;
        }
        let runner = host
            .runner_builder()
            .build(runner_config, &opts)
            .map_err(|e| RegistryError::Runner(e.to_string()))?;

        let helpers = helper::load(&config.helpers, host).await?;
        let support = support::load(config.include, &translation, host).await?;

        debug!(
            helpers = helpers.len(),
            support = support.len(),
            translation = translation.is_real(),
            "registry created"
        );
        Ok(Self {
            helpers,
            support,
            translation,
            runner,
            recorder: host.recorder(),
        })
    }

    /// All helpers, in load order.
    pub fn helpers(&self) -> &Store<Box<dyn Helper>> {
        &self.helpers
    }

    /// A single helper by name.
    pub fn helper(&self, name: &str) -> Option<&dyn Helper> {
        self.helpers.get(name).map(|h| h.as_ref())
    }

    /// All support objects.
    pub fn support_objects(&self) -> &Store<Arc<Intercepted>> {
        &self.support
    }

    /// A single support object by name. `I` always resolves after creation.
    pub fn support(&self, name: &str) -> Option<Arc<Intercepted>> {
        self.support.get(name).cloned()
    }

    /// The active translation.
    pub fn translation(&self) -> &Translation {
        &self.translation
    }

    /// The runner instance.
    pub fn runner(&self) -> &dyn Runner {
        self.runner.as_ref()
    }

    /// Merge a partial state into the registry.
    ///
    /// Maps merge key-by-key (the delta's keys overwrite, absent keys are
    /// preserved); a translation or runner in the delta replaces the current
    /// one. Support objects in the delta get the same async interception as
    /// loaded ones.
    pub fn append(&mut self, delta: Delta) {
        self.helpers.merge(delta.helpers);
        let mut wrapped = Store::new();
        for (name, object) in delta.support {
            wrapped.insert(
                name.clone(),
                Arc::new(Intercepted::wrap(name, object, Arc::clone(&self.recorder))),
            );
        }
        self.support.merge(wrapped);
        if let Some(translation) = delta.translation {
            self.translation = translation;
        }
        if let Some(runner) = delta.runner {
            self.runner = runner;
        }
    }

    /// Replace helpers and support objects wholesale and reset the
    /// translation to the sentinel. The runner is left untouched.
    pub fn reset(
        &mut self,
        helpers: Store<Box<dyn Helper>>,
        support: Store<Box<dyn SupportObject>>,
    ) {
        self.helpers = helpers;
        let mut wrapped = Store::new();
        for (name, object) in support {
            wrapped.insert(
                name.clone(),
                Arc::new(Intercepted::wrap(name, object, Arc::clone(&self.recorder))),
            );
        }
        self.support = wrapped;
        self.translation = Translation::none();
    }

    /// [`Container::reset`] with empty maps.
    pub fn clear(&mut self) {
        self.reset(Store::new(), Store::new());
    }
}

/// A partial state for [`Container::append`].
#[derive(Debug, Default)]
pub struct Delta {
    helpers: Store<Box<dyn Helper>>,
    support: Store<Box<dyn SupportObject>>,
    translation: Option<Translation>,
    runner: Option<Box<dyn Runner>>,
}

impl Delta {
    /// An empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a helper.
    pub fn with_helper(mut self, name: impl Into<String>, helper: Box<dyn Helper>) -> Self {
        self.helpers.insert(name, helper);
        self
    }

    /// Add or replace a support object.
    pub fn with_support(mut self, name: impl Into<String>, object: Box<dyn SupportObject>) -> Self {
        self.support.insert(name, object);
        self
    }

    /// Replace the active translation.
    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.translation = Some(translation);
        self
    }

    /// Replace the runner.
    pub fn with_runner(mut self, runner: Box<dyn Runner>) -> Self {
        self.runner = Some(runner);
        self
    }
}
