//! Support objects: page objects, fixtures, and the default actor.
//!
//! A support object is any user-supplied object registered for lookup by
//! name. Config entries may be a module path (resolved through the host's
//! build-time table), a zero-argument factory, or an already-built instance.
//! Every resolved instance is wrapped in [`Intercepted`] exactly once at load
//! time so that failures in its declared-async methods are captured even when
//! the caller never awaits the returned future.

use std::any::Any;
use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BoxedError, RegistryError, RegistryResult};
use crate::host::Host;
use crate::recorder::Recorder;
use crate::store::Store;
use crate::translation::{Translation, DEFAULT_ACTOR_ALIAS};

/// A resolved support instance.
///
/// Methods are dispatched by name through [`SupportObject::call`], mirroring
/// lookup on a dynamic object. Members that return deferred work must be
/// declared in [`SupportObject::async_methods`]; exactly those are wrapped by
/// the error interceptor at registration time.
#[async_trait]
pub trait SupportObject: Send + Sync + Debug {
    /// One-time initialization hook. Default is a no-op.
    ///
    /// Not invoked for factory products: the factory already had its chance
    /// to build a ready instance.
    async fn init(&mut self) -> Result<(), BoxedError> {
        Ok(())
    }

    /// Names of the methods whose results are deferred/awaitable.
    ///
    /// Include every name a caller may use: an object that answers localized
    /// action names must declare those too, or calls under them bypass the
    /// interceptor.
    fn async_methods(&self) -> Vec<String> {
        Vec::new()
    }

    /// Invoke a method by name.
    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, BoxedError>;

    /// Downcast to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// A zero-argument callable producing a support instance.
pub type SupportFactory =
    Box<dyn Fn() -> Result<Box<dyn SupportObject>, BoxedError> + Send + Sync>;

/// A support-object config entry.
pub enum SupportEntry {
    /// A module path, resolved through the host's support-module table.
    Module(String),
    /// A factory; invoked once, its return value is stored.
    Factory(SupportFactory),
    /// An already-built instance, used as-is (init hook runs if declared).
    Instance(Box<dyn SupportObject>),
}

impl Debug for SupportEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupportEntry::Module(path) => f.debug_tuple("Module").field(path).finish(),
            SupportEntry::Factory(_) => f.debug_tuple("Factory").finish(),
            SupportEntry::Instance(obj) => f.debug_tuple("Instance").field(obj).finish(),
        }
    }
}

/// The async error interceptor around a support instance.
///
/// Calls to declared-async methods always settle successfully; a failure is
/// forwarded to the shared recorder (first error wins) and replaced by
/// `Value::Null`. Calls to other methods pass errors through unchanged.
#[derive(Debug)]
pub struct Intercepted {
    name: String,
    inner: Box<dyn SupportObject>,
    async_methods: HashSet<String>,
    recorder: Arc<dyn Recorder>,
}

impl Intercepted {
    /// Wrap an instance. Happens exactly once per object, at load time.
    pub(crate) fn wrap(
        name: impl Into<String>,
        inner: Box<dyn SupportObject>,
        recorder: Arc<dyn Recorder>,
    ) -> Self {
        let async_methods = inner.async_methods().into_iter().collect();
        Self {
            name: name.into(),
            inner,
            async_methods,
            recorder,
        }
    }

    /// The name this object is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke a method on the wrapped instance.
    pub async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, BoxedError> {
        if !self.async_methods.contains(method) {
            return self.inner.call(method, args).await;
        }
        match self.inner.call(method, args).await {
            Ok(value) => Ok(value),
            Err(error) => {
                warn!(object = %self.name, method, %error, "deferred failure routed to recorder");
                self.recorder.record_first_async_error(error);
                Ok(Value::Null)
            }
        }
    }

    /// Downcast the wrapped instance to its concrete type.
    pub fn downcast_ref<T: SupportObject + 'static>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }
}

/// The default actor: the test's primary agent.
///
/// Synthesized when no `I` entry is configured. Its action-chaining DSL lives
/// outside this core; here it only resolves localized action names through
/// the active vocabulary and answers `say`.
#[derive(Debug)]
pub struct Actor {
    translation: Translation,
}

impl Actor {
    /// Create an actor bound to the active translation.
    pub fn new(translation: Translation) -> Self {
        Self { translation }
    }
}

impl Actor {
    /// Canonical names of the actor's deferred actions.
    const DEFERRED_ACTIONS: [&'static str; 1] = ["say"];
}

#[async_trait]
impl SupportObject for Actor {
    fn async_methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = Self::DEFERRED_ACTIONS
            .iter()
            .map(|s| s.to_string())
            .collect();
        // Tests call the actor by localized names; those reach the same
        // deferred actions and are intercepted under the called name.
        for canonical in Self::DEFERRED_ACTIONS {
            methods.extend(
                self.translation
                    .localized_names(canonical)
                    .map(|name| name.to_string()),
            );
        }
        methods
    }

    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, BoxedError> {
        let canonical = self.translation.translate(method);
        match canonical {
            "say" => {
                let line = args
                    .first()
                    .and_then(|v| v.as_str())
                    .ok_or("say needs a line to speak")?;
                Ok(Value::String(line.to_string()))
            }
            other => Err(format!("actor has no action \"{other}\"").into()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Load every configured support object and guarantee an actor entry.
///
/// Runs after the translation loader: the active translation decides the
/// actor alias. Consumes the entries (instances move into the registry).
pub async fn load(
    entries: Store<SupportEntry>,
    translation: &Translation,
    host: &Host,
) -> RegistryResult<Store<Arc<Intercepted>>> {
    let mut support: Store<Arc<Intercepted>> = Store::new();
    let recorder = host.recorder();

    for (name, entry) in entries {
        let instance = resolve(&name, entry, host).await?;
        debug!(object = %name, "loaded support object");
        support.insert(
            name.clone(),
            Arc::new(Intercepted::wrap(name, instance, Arc::clone(&recorder))),
        );
    }

    if !support.contains(DEFAULT_ACTOR_ALIAS) {
        let actor: Box<dyn SupportObject> = Box::new(Actor::new(translation.clone()));
        let actor = Arc::new(Intercepted::wrap(DEFAULT_ACTOR_ALIAS, actor, recorder));
        support.insert(DEFAULT_ACTOR_ALIAS, Arc::clone(&actor));
        debug!("synthesized default actor");

        // A localized alias only applies for a configured translation; the
        // sentinel keeps its default alias and must not duplicate the actor.
        // An entry the user configured under the alias name stays theirs.
        let alias = translation.actor_alias();
        if translation.is_real() && alias != DEFAULT_ACTOR_ALIAS && !support.contains(alias) {
            support.insert(alias, actor);
            debug!(alias, "registered actor under localized alias");
        }
    }

    Ok(support)
}

async fn resolve(
    name: &str,
    entry: SupportEntry,
    host: &Host,
) -> RegistryResult<Box<dyn SupportObject>> {
    match entry {
        SupportEntry::Module(path) => {
            let factory = host
                .support_module(&path)
                .ok_or_else(|| {
                    RegistryError::load(name, path.as_str(), "module is not registered")
                })?;
            factory().map_err(|e| RegistryError::initialization(name, e))
        }
        SupportEntry::Factory(factory) => {
            factory().map_err(|e| RegistryError::initialization(name, e))
        }
        SupportEntry::Instance(mut instance) => {
            instance
                .init()
                .await
                .map_err(|e| RegistryError::initialization(name, e))?;
            Ok(instance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::FirstErrorRecorder;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct Flaky;

    #[async_trait]
    impl SupportObject for Flaky {
        fn async_methods(&self) -> Vec<String> {
            vec!["fetch".to_string()]
        }

        async fn call(&self, method: &str, _args: Vec<Value>) -> Result<Value, BoxedError> {
            match method {
                "fetch" => Err("connection reset".into()),
                "name" => Err("sync failure".into()),
                _ => Ok(Value::Null),
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn recorder() -> Arc<FirstErrorRecorder> {
        Arc::new(FirstErrorRecorder::new())
    }

    #[tokio::test]
    async fn test_declared_async_failure_settles_ok_and_is_recorded() {
        let recorder = recorder();
        let wrapped = Intercepted::wrap("flaky", Box::new(Flaky), recorder.clone());

        let result = wrapped.call("fetch", vec![]).await;
        assert_eq!(result.unwrap(), Value::Null);
        assert_eq!(
            recorder.error_message().as_deref(),
            Some("connection reset")
        );
    }

    #[tokio::test]
    async fn test_undeclared_method_failure_passes_through() {
        let recorder = recorder();
        let wrapped = Intercepted::wrap("flaky", Box::new(Flaky), recorder.clone());

        let result = wrapped.call("name", vec![]).await;
        assert!(result.is_err());
        assert!(!recorder.has_error());
    }

    #[tokio::test]
    async fn test_recorder_keeps_first_of_many_failures() {
        let recorder = recorder();
        let wrapped = Intercepted::wrap("flaky", Box::new(Flaky), recorder.clone());

        for _ in 0..3 {
            wrapped.call("fetch", vec![]).await.unwrap();
        }
        assert_eq!(
            recorder.error_message().as_deref(),
            Some("connection reset")
        );
        assert_eq!(recorder.take().unwrap().to_string(), "connection reset");
        assert!(recorder.take().is_none());
    }

    #[tokio::test]
    async fn test_actor_translates_action_names() {
        let mut vocab = HashMap::new();
        vocab.insert("dis".to_string(), "say".to_string());
        let actor = Actor::new(Translation::new("Je", vocab));

        let out = actor
            .call("dis", vec![Value::String("bonjour".into())])
            .await
            .unwrap();
        assert_eq!(out, Value::String("bonjour".into()));

        assert!(actor.call("fly", vec![]).await.is_err());
    }

    #[tokio::test]
    async fn test_actor_declares_deferred_actions_with_localized_names() {
        let mut vocab = HashMap::new();
        vocab.insert("dis".to_string(), "say".to_string());
        vocab.insert("vole".to_string(), "fly".to_string());
        let actor = Actor::new(Translation::new("Je", vocab));

        let methods = actor.async_methods();
        assert!(methods.contains(&"say".to_string()));
        assert!(methods.contains(&"dis".to_string()));
        // Names mapping to actions the actor does not defer stay undeclared.
        assert!(!methods.contains(&"vole".to_string()));
    }

    #[tokio::test]
    async fn test_actor_failure_routes_to_recorder() {
        let recorder = recorder();
        let actor: Box<dyn SupportObject> = Box::new(Actor::new(Translation::none()));
        let wrapped = Intercepted::wrap("I", actor, recorder.clone());

        // "say" without a line fails inside, yet the call settles Ok.
        let out = wrapped.call("say", vec![]).await.unwrap();
        assert_eq!(out, Value::Null);
        assert_eq!(
            recorder.error_message().as_deref(),
            Some("say needs a line to speak")
        );
    }

    #[tokio::test]
    async fn test_localized_actor_failure_is_intercepted() {
        let mut vocab = HashMap::new();
        vocab.insert("dis".to_string(), "say".to_string());
        let recorder = recorder();
        let actor: Box<dyn SupportObject> = Box::new(Actor::new(Translation::new("Je", vocab)));
        let wrapped = Intercepted::wrap("I", actor, recorder.clone());

        let out = wrapped.call("dis", vec![]).await.unwrap();
        assert_eq!(out, Value::Null);
        assert!(recorder.has_error());
    }
}
