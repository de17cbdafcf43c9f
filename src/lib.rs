//! # Testcast
//!
//! **Testcast** is the service registry and lifecycle core of a
//! test-execution framework. At startup it assembles four categories of
//! collaborators and exposes them through a single lookup facade:
//!
//! - **Helpers** — pluggable drivers performing framework actions
//! - **Support objects** — user-supplied page objects and fixtures,
//!   including the default actor `I`
//! - **Translation** — a locale vocabulary mapping action names to
//!   canonical ones
//! - **Runner** — the test-runner instance, opaque to this core
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use testcast::prelude::*;
//!
//! let host = Host::new()
//!     .register_builtin_helper("Browser", Arc::new(BrowserFactory))
//!     .with_runner_builder(Box::new(MochaBuilder));
//!
//! let config = Config::new()
//!     .with_helper("Browser", HelperConfig::new())
//!     .with_translation("fr-FR");
//!
//! let container = Container::create(config, CreateOptions::new(), &host).await?;
//! let actor = container.support("I").unwrap();
//! ```
//!
//! ## Lifecycle
//!
//! [`Container::create`] loads the translation first (the support loader
//! needs the actor alias), constructs the runner, then loads helpers and
//! support objects in config order. [`Container::append`] deep-merges a
//! partial state; [`Container::clear`] replaces helpers and support
//! wholesale and resets the translation, leaving the runner untouched.
//!
//! Failures inside a support object's declared-async methods are never
//! raised to the caller: the [`support::Intercepted`] wrapper forwards the
//! first one per run to the shared [`Recorder`] and the call settles
//! successfully.

pub mod config;
pub mod container;
pub mod error;
pub mod helper;
pub mod host;
pub mod recorder;
pub mod runner;
pub mod store;
pub mod support;
pub mod translation;

pub mod prelude;

// Re-export core types
pub use config::{Config, CreateOptions, HelperConfig};
pub use container::{Container, Delta};
pub use error::{BoxedError, RegistryError, RegistryResult};
pub use helper::{Helper, HelperFactory, ModuleRef};
pub use host::Host;
pub use recorder::{FirstErrorRecorder, Recorder};
pub use runner::{Runner, RunnerBuilder, RunnerConfig};
pub use store::Store;
pub use support::{Actor, Intercepted, SupportEntry, SupportFactory, SupportObject};
pub use translation::{Translation, DEFAULT_ACTOR_ALIAS};

// Re-export async-trait for convenience
pub use async_trait::async_trait;
