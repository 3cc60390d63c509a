//! # mediator - In-Process Request Dispatch and Notification Fan-Out
//!
//! `mediator` decouples senders from receivers inside one process:
//!
//! - a **request** is routed to exactly one handler, through an ordered onion
//!   of pipeline behaviors, and yields a typed response;
//! - a **notification** is delivered to every handler bound to its type, in
//!   registration order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mediator::prelude::*;
//! use std::sync::Arc;
//!
//! #[derive(Request)]
//! #[request(response = String)]
//! struct Ping {
//!     message: String,
//! }
//!
//! struct PingHandler;
//!
//! impl RequestHandler<Ping> for PingHandler {
//!     async fn handle(&self, ping: &Ping, _cancel: &CancellationToken) -> Result<String, MediatorError> {
//!         Ok(format!("Pong: {}", ping.message))
//!     }
//! }
//!
//! let mut builder = Registry::builder();
//! builder
//!     .add_request_handler::<Ping, _>(PingHandler)?
//!     .add_behavior::<Ping, _>(LoggingBehavior::new());
//! let mediator = Mediator::new(Arc::new(builder.build()));
//!
//! let pong = mediator
//!     .send(Ping { message: "Hello".into() }, &CancellationToken::new())
//!     .await?;
//! assert_eq!(pong, "Pong: Hello");
//! ```
//!
//! ## Features
//!
//! - `macros` (default): `#[derive(Request)]` and `#[derive(Notification)]`
//! - `inventory` (default): link-time registration with `register_*!` and
//!   [`RegistryBuilder::scan`]
//! - `timeout` (default): [`behaviors::TimeoutBehavior`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod orchestrator;

pub use mediator_core::{
    // Error types
    BoxError,
    // Cancellation
    CancellationToken,
    // Object-safe variants
    DynNotificationHandler,
    DynPipelineBehavior,
    DynRequestHandler,
    // Resolution
    HandlerProvider,
    MediatorError,
    // Pipeline
    Next,
    // Messages
    Notification,
    // Handlers
    NotificationHandler,
    Pipeline,
    PipelineBehavior,
    RegistrationError,
    Request,
    RequestHandler,
};

// Orchestration
pub use orchestrator::{
    CollectErrors, Concurrent, FailFast, Mediator, PublishStrategy, Publisher, Sender,
};

// Registry
pub use mediator_std::registry::{Lifetime, Registry, RegistryBuilder, Scope};

// Scan registration
#[cfg(feature = "inventory")]
pub use mediator_std::{
    collected::ScanTarget, register_notification_handler, register_pipeline_behavior,
    register_request_handler,
};

/// Standard pipeline behaviors.
pub mod behaviors {
    #![allow(clippy::wildcard_imports)]
    pub use mediator_std::behaviors::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use mediator_std::testing::*;
}

/// Prelude module - common imports for mediator.
///
/// # Usage
///
/// ```rust,ignore
/// use mediator::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Cancellation
        CancellationToken,
        // Registry
        Lifetime,
        // Core
        Mediator,
        MediatorError,
        Next,
        Notification,
        NotificationHandler,
        PipelineBehavior,
        Publisher,
        Registry,
        RegistryBuilder,
        Request,
        RequestHandler,
        Sender,
        behaviors::{LoggingBehavior, RetryBehavior, TracingBehavior},
    };
}

#[cfg(feature = "macros")]
pub use mediator_macros::{Notification, Request};

#[cfg(feature = "inventory")]
pub use inventory;
