//! Message traits for request and notification types.

/// A request routed to exactly one handler.
///
/// The response type is fixed by the request type, so a request type alone
/// identifies its handler.
///
/// # Example
///
/// ```rust
/// use mediator_core::Request;
///
/// struct Ping {
///     message: String,
/// }
///
/// impl Request for Ping {
///     type Response = String;
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Request",
    label = "missing `Request` implementation",
    note = "Requests must be `Send + Sync + 'static` and declare their `Response` type."
)]
pub trait Request: Send + Sync + 'static {
    /// The value produced by the request's handler.
    type Response: Send + 'static;
}

/// A notification fanned out to any number of handlers.
///
/// # Example
///
/// ```rust
/// use mediator_core::Notification;
///
/// struct CustomerCreated {
///     id: u64,
/// }
///
/// impl Notification for CustomerCreated {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Notification",
    label = "must implement `Notification`",
    note = "Notifications must be thread-safe and static."
)]
pub trait Notification: Send + Sync + 'static {}
