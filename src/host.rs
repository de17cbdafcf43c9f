//! Build-time environment for registry creation.
//!
//! A dynamic runtime would `require` helper and support modules by string at
//! load time. Here the host carries name → factory tables populated when the
//! process is assembled, plus the collaborators the loaders need: the runner
//! builder, the shared recorder, the project root, and the builtin
//! translation vocabularies.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::helper::{HelperFactory, ModuleRef};
use crate::recorder::{FirstErrorRecorder, Recorder};
use crate::runner::{NoopRunnerBuilder, RunnerBuilder};
use crate::support::SupportFactory;
use crate::translation::Translation;

/// The registry's view of the installed framework.
pub struct Host {
    builtin_helpers: HashMap<String, Arc<dyn HelperFactory>>,
    packages: HashMap<String, Arc<dyn HelperFactory>>,
    local_modules: HashMap<String, Arc<dyn HelperFactory>>,
    support_modules: HashMap<String, SupportFactory>,
    translations: HashMap<String, Translation>,
    project_root: PathBuf,
    local_install: bool,
    runner_builder: Box<dyn RunnerBuilder>,
    recorder: Arc<dyn Recorder>,
}

impl Host {
    /// A host with empty tables, a no-op runner builder, and the default
    /// first-error recorder. The framework is assumed to be a project-local
    /// install unless [`Host::global_install`] says otherwise.
    pub fn new() -> Self {
        Self {
            builtin_helpers: HashMap::new(),
            packages: HashMap::new(),
            local_modules: HashMap::new(),
            support_modules: HashMap::new(),
            translations: HashMap::new(),
            project_root: PathBuf::from("."),
            local_install: true,
            runner_builder: Box::new(NoopRunnerBuilder),
            recorder: Arc::new(FirstErrorRecorder::new()),
        }
    }

    /// Register a builtin helper under its name.
    pub fn register_builtin_helper(
        mut self,
        name: impl Into<String>,
        factory: Arc<dyn HelperFactory>,
    ) -> Self {
        self.builtin_helpers.insert(name.into(), factory);
        self
    }

    /// Register an installed plugin helper under its package name.
    pub fn register_package(
        mut self,
        package: impl Into<String>,
        factory: Arc<dyn HelperFactory>,
    ) -> Self {
        self.packages.insert(package.into(), factory);
        self
    }

    /// Register a custom helper under its project-root-relative path.
    pub fn register_local_module(
        mut self,
        path: impl Into<String>,
        factory: Arc<dyn HelperFactory>,
    ) -> Self {
        self.local_modules.insert(path.into(), factory);
        self
    }

    /// Register a support module under its path.
    pub fn register_support_module(
        mut self,
        path: impl Into<String>,
        factory: SupportFactory,
    ) -> Self {
        self.support_modules.insert(path.into(), factory);
        self
    }

    /// Register a builtin translation vocabulary.
    pub fn register_translation(
        mut self,
        locale: impl Into<String>,
        translation: Translation,
    ) -> Self {
        self.translations.insert(locale.into(), translation);
        self
    }

    /// Set the project root used to resolve file-backed translations.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    /// Mark the framework as globally installed, switching the phrasing of
    /// remediation commands in installation errors.
    pub fn global_install(mut self) -> Self {
        self.local_install = false;
        self
    }

    /// Set the runner builder.
    pub fn with_runner_builder(mut self, builder: Box<dyn RunnerBuilder>) -> Self {
        self.runner_builder = builder;
        self
    }

    /// Set the shared recorder.
    pub fn with_recorder(mut self, recorder: Arc<dyn Recorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Look up a helper factory for a resolved module reference.
    pub fn helper_factory(&self, module: &ModuleRef) -> Option<Arc<dyn HelperFactory>> {
        let table = match module {
            ModuleRef::Builtin(_) => &self.builtin_helpers,
            ModuleRef::Local(_) => &self.local_modules,
            ModuleRef::Package(_) => &self.packages,
        };
        table.get(module.reference()).cloned()
    }

    /// Look up a support module by path.
    pub fn support_module(&self, path: &str) -> Option<&SupportFactory> {
        self.support_modules.get(path)
    }

    /// Look up a builtin translation by locale name.
    pub fn builtin_translation(&self, locale: &str) -> Option<&Translation> {
        self.translations.get(locale)
    }

    /// The project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The runner builder.
    pub fn runner_builder(&self) -> &dyn RunnerBuilder {
        self.runner_builder.as_ref()
    }

    /// A handle to the shared recorder.
    pub fn recorder(&self) -> Arc<dyn Recorder> {
        Arc::clone(&self.recorder)
    }

    /// The remediation command for a set of missing dependencies.
    pub fn install_command(&self, missing: &[String]) -> String {
        let deps = missing.join(" ");
        if self.local_install {
            format!("cargo add --dev {deps}")
        } else {
            format!("cargo install {deps}")
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("builtin_helpers", &self.builtin_helpers.len())
            .field("packages", &self.packages.len())
            .field("local_modules", &self.local_modules.len())
            .field("support_modules", &self.support_modules.len())
            .field("translations", &self.translations.keys().collect::<Vec<_>>())
            .field("project_root", &self.project_root)
            .field("local_install", &self.local_install)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_command_local_vs_global() {
        let missing = vec!["webdriver".to_string(), "gecko".to_string()];

        let local = Host::new();
        assert_eq!(local.install_command(&missing), "cargo add --dev webdriver gecko");

        let global = Host::new().global_install();
        assert_eq!(global.install_command(&missing), "cargo install webdriver gecko");
    }

    #[test]
    fn test_helper_factory_tables_are_separate() {
        let host = Host::new();
        assert!(host
            .helper_factory(&ModuleRef::Builtin("Browser".to_string()))
            .is_none());
        assert!(host
            .helper_factory(&ModuleRef::Package("Browser".to_string()))
            .is_none());
    }
}
