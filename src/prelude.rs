//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! from Testcast for convenient glob imports.
//!
//! # Example
//!
//! ```rust
//! use testcast::prelude::*;
//! ```

// Configuration
pub use crate::config::{Config, CreateOptions, HelperConfig};

// Facade
pub use crate::container::{Container, Delta};

// Contracts
pub use crate::helper::{Helper, HelperFactory, ModuleRef};
pub use crate::support::{Actor, Intercepted, SupportEntry, SupportFactory, SupportObject};
pub use crate::runner::{Runner, RunnerBuilder, RunnerConfig};

// Environment
pub use crate::host::Host;
pub use crate::recorder::{FirstErrorRecorder, Recorder};
pub use crate::store::Store;
pub use crate::translation::{Translation, DEFAULT_ACTOR_ALIAS};

// Errors
pub use crate::error::{BoxedError, RegistryError, RegistryResult};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
