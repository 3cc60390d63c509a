//! Standard pipeline behaviors.
//!
//! Every behavior here is generic over the request type, so one value can be
//! registered for as many request types as needed.

mod logging;
mod retry;
#[cfg(feature = "timeout")]
mod timeout;
mod tracing;

pub use logging::LoggingBehavior;
pub use retry::RetryBehavior;
#[cfg(feature = "timeout")]
pub use timeout::TimeoutBehavior;
pub use tracing::TracingBehavior;
