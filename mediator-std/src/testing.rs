//! Testing utilities for mediator pipelines.
//!
//! Test doubles that write into a shared [`CallLog`], so a test can assert
//! the exact order in which behaviors and handlers ran.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered log of invocations
//! - [`RecordingBehavior`]: A behavior that logs before and after `next`
//! - [`ShortCircuitBehavior`]: A behavior that answers without calling `next`
//! - [`RecordingNotificationHandler`]: A notification handler that logs its tag
//! - [`EchoHandler`]: A request handler that answers with its request
//! - [`CountingHandler`]: A request handler that counts invocations

use mediator_core::{
    CancellationToken, MediatorError, Next, Notification, NotificationHandler, PipelineBehavior,
    Request, RequestHandler,
};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Call Log
// ============================================================================

/// A shared log of invocations, in the order they happened.
///
/// Clones share the same underlying log.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// builder.add_behavior::<Ping, _>(RecordingBehavior::new("B1", log.clone()));
///
/// mediator.send(Ping, &cancel).await?;
/// assert_eq!(log.entries(), ["B1-pre", "handler", "B1-post"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// Get a copy of the recorded entries.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Get the number of recorded entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all recorded entries.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

// ============================================================================
// Recording Behavior
// ============================================================================

/// A behavior that logs `"{name}-pre"`, runs `next`, then logs `"{name}-post"`.
///
/// The post entry is written whether the rest of the pipeline succeeded or not.
#[derive(Debug, Clone)]
pub struct RecordingBehavior {
    name: &'static str,
    log: CallLog,
}

impl RecordingBehavior {
    /// Create a new recording behavior.
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self { name, log }
    }
}

impl<R: Request> PipelineBehavior<R> for RecordingBehavior {
    async fn handle(
        &self,
        _request: &R,
        cancel: &CancellationToken,
        next: Next<'_, R>,
    ) -> Result<R::Response, MediatorError> {
        self.log.push(format!("{}-pre", self.name));
        let result = next.run(cancel).await;
        self.log.push(format!("{}-post", self.name));
        result
    }
}

// ============================================================================
// Short-Circuit Behavior
// ============================================================================

/// A behavior that returns a fixed response and never calls `next`.
///
/// Logs `"{name}-short"` when invoked.
#[derive(Debug, Clone)]
pub struct ShortCircuitBehavior<V> {
    name: &'static str,
    response: V,
    log: CallLog,
}

impl<V> ShortCircuitBehavior<V> {
    /// Create a behavior answering with `response`.
    pub fn new(name: &'static str, response: V, log: CallLog) -> Self {
        Self {
            name,
            response,
            log,
        }
    }
}

impl<R, V> PipelineBehavior<R> for ShortCircuitBehavior<V>
where
    R: Request<Response = V>,
    V: Clone + Send + Sync + 'static,
{
    async fn handle(
        &self,
        _request: &R,
        _cancel: &CancellationToken,
        _next: Next<'_, R>,
    ) -> Result<V, MediatorError> {
        self.log.push(format!("{}-short", self.name));
        Ok(self.response.clone())
    }
}

// ============================================================================
// Recording Notification Handler
// ============================================================================

/// A notification handler that logs its tag on every delivery.
///
/// A failing handler logs its tag, then returns a [`MediatorError::Handler`]
/// whose message is `"{tag} failed"`.
#[derive(Debug, Clone)]
pub struct RecordingNotificationHandler {
    tag: &'static str,
    log: CallLog,
    fail: bool,
}

impl RecordingNotificationHandler {
    /// Create a handler that succeeds.
    pub fn new(tag: &'static str, log: CallLog) -> Self {
        Self {
            tag,
            log,
            fail: false,
        }
    }

    /// Create a handler that fails after logging.
    pub fn failing(tag: &'static str, log: CallLog) -> Self {
        Self {
            tag,
            log,
            fail: true,
        }
    }
}

impl<N: Notification> NotificationHandler<N> for RecordingNotificationHandler {
    async fn handle(&self, _notification: &N, _cancel: &CancellationToken) -> Result<(), MediatorError> {
        self.log.push(self.tag);
        if self.fail {
            return Err(MediatorError::handler(format!("{} failed", self.tag)));
        }
        Ok(())
    }
}

// ============================================================================
// Echo Handler
// ============================================================================

/// A request handler answering with a clone of the request itself.
///
/// Works for any request whose response type is the request type. Logs
/// `"handler"` when a log is attached.
#[derive(Debug, Clone, Default)]
pub struct EchoHandler {
    log: Option<CallLog>,
}

impl EchoHandler {
    /// Create a new echo handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an echo handler that logs `"handler"` into `log`.
    pub fn logging(log: CallLog) -> Self {
        Self { log: Some(log) }
    }
}

impl<R> RequestHandler<R> for EchoHandler
where
    R: Request<Response = R> + Clone,
{
    async fn handle(&self, request: &R, _cancel: &CancellationToken) -> Result<R, MediatorError> {
        if let Some(log) = &self.log {
            log.push("handler");
        }
        Ok(request.clone())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A request handler that counts invocations and answers with the count.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<R> RequestHandler<R> for CountingHandler
where
    R: Request<Response = usize>,
{
    async fn handle(&self, _request: &R, _cancel: &CancellationToken) -> Result<usize, MediatorError> {
        Ok(self.count.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
