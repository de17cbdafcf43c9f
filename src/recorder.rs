//! Shared recorder for deferred async failures.
//!
//! Wrapped support-object methods hand their errors here instead of raising
//! them (see [`crate::support::Intercepted`]). The runner's step loop does
//! not await every support-object call chain, so an error that surfaces
//! after the loop has moved on would otherwise be lost.

use std::sync::Mutex;

use crate::error::BoxedError;

/// Sink for errors raised inside wrapped asynchronous support-object methods.
///
/// Implementations must be idempotent after the first call per run: the
/// first recorded error wins and later ones are inert no-ops.
pub trait Recorder: Send + Sync + std::fmt::Debug {
    /// Record an error if none has been recorded yet for this run.
    fn record_first_async_error(&self, error: BoxedError);
}

/// Default [`Recorder`]: a mutex-guarded single-error slot.
///
/// "First wins" is decided by lock acquisition order; no ordering is
/// guaranteed among the discarded errors beyond "after the first".
#[derive(Debug, Default)]
pub struct FirstErrorRecorder {
    slot: Mutex<Option<BoxedError>>,
}

impl FirstErrorRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an error has been recorded this run.
    pub fn has_error(&self) -> bool {
        self.slot.lock().expect("recorder lock poisoned").is_some()
    }

    /// The recorded error's message, if any.
    pub fn error_message(&self) -> Option<String> {
        self.slot
            .lock()
            .expect("recorder lock poisoned")
            .as_ref()
            .map(|e| e.to_string())
    }

    /// Take the recorded error, emptying the slot for the next run.
    pub fn take(&self) -> Option<BoxedError> {
        self.slot.lock().expect("recorder lock poisoned").take()
    }

    /// Discard any recorded error. Called between test runs.
    pub fn reset(&self) {
        self.slot.lock().expect("recorder lock poisoned").take();
    }
}

impl Recorder for FirstErrorRecorder {
    fn record_first_async_error(&self, error: BoxedError) {
        let mut slot = self.slot.lock().expect("recorder lock poisoned");
        if slot.is_none() {
            *slot = Some(error);
        }
    }
}
