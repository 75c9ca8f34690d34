//! Test registry
//!
//! Holds the immutable test definitions for a run, in registration order,
//! plus the optional init and cleanup hooks. The registry is an explicit
//! value built by the suite binary and handed to the runner; there is no
//! process-wide mutable state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Test body. Returning `None` (or an empty message) means the test passed;
/// a non-empty message is a failure and becomes the recorded detail.
pub type TestFn = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Init/cleanup hook body
pub type HookFn = Arc<dyn Fn() + Send + Sync>;

/// A registered test: callable, point value, optional timeout, description
///
/// Immutable once registered; owned by the registry for the life of the run.
#[derive(Clone)]
pub struct TestDefinition {
    name: String,
    callable: TestFn,
    points: u32,
    timeout: Option<Duration>,
    description: String,
}

impl TestDefinition {
    pub fn new(
        name: impl Into<String>,
        points: u32,
        callable: impl Fn() -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            callable: Arc::new(callable),
            points,
            timeout: None,
            description: String::new(),
        }
    }

    /// Set the wall-clock budget; absent means the test may run unbounded
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Invoke the test body
    pub fn call(&self) -> Option<String> {
        (self.callable)()
    }
}

impl fmt::Debug for TestDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDefinition")
            .field("name", &self.name)
            .field("points", &self.points)
            .field("timeout", &self.timeout)
            .field("description", &self.description)
            .finish()
    }
}

/// Ordered collection of test definitions plus single-slot hooks
#[derive(Clone, Default)]
pub struct Registry {
    tests: Vec<TestDefinition>,
    init: Option<HookFn>,
    cleanup: Option<HookFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition keyed by name. Re-registering a name silently
    /// replaces the earlier definition in place (last registration wins,
    /// original position kept).
    pub fn register(&mut self, def: TestDefinition) {
        if let Some(slot) = self.tests.iter_mut().find(|t| t.name == def.name) {
            *slot = def;
        } else {
            self.tests.push(def);
        }
    }

    /// Install the init hook; a later registration overwrites an earlier one
    pub fn register_init(&mut self, hook: impl Fn() + Send + Sync + 'static) {
        self.init = Some(Arc::new(hook));
    }

    /// Install the cleanup hook; a later registration overwrites an earlier one
    pub fn register_cleanup(&mut self, hook: impl Fn() + Send + Sync + 'static) {
        self.cleanup = Some(Arc::new(hook));
    }

    /// All definitions in registration order, without executing anything
    pub fn list(&self) -> &[TestDefinition] {
        &self.tests
    }

    /// Look up a definition by name (used by the worker process)
    pub fn get(&self, name: &str) -> Option<&TestDefinition> {
        self.tests.iter().find(|t| t.name == name)
    }

    pub fn init_hook(&self) -> Option<&HookFn> {
        self.init.as_ref()
    }

    pub fn cleanup_hook(&self) -> Option<&HookFn> {
        self.cleanup.as_ref()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("tests", &self.tests)
            .field("init", &self.init.is_some())
            .field("cleanup", &self.cleanup.is_some())
            .finish()
    }
}
