//! # mediator-core
//!
//! Core traits for the mediator dispatch framework.
//!
//! This crate has minimal dependencies and is meant to be imported by crates
//! that only define requests, notifications, handlers or behaviors, without
//! pulling in the registry or the `Mediator` itself.
//!
//! # Building Blocks
//!
//! ## Messages ([`Request`], [`Notification`])
//!
//! A request is routed to exactly one handler and yields a typed response. A
//! notification is fanned out to zero or more handlers and yields nothing.
//!
//! ## Handlers ([`RequestHandler`], [`NotificationHandler`])
//!
//! The terminal point of dispatch where business logic runs. Every handler
//! receives the message by reference and the caller's [`CancellationToken`].
//!
//! ## Behaviors ([`PipelineBehavior`])
//!
//! Middleware wrapped around request handlers. Each behavior receives a
//! [`Next`] continuation and may call it, call it repeatedly, or skip it.
//!
//! ## Pipeline ([`Pipeline`])
//!
//! Composes the behaviors of a request around its handler, first registered
//! outermost.
//!
//! ## Resolution ([`HandlerProvider`])
//!
//! The contract the mediator uses to look up handlers and behaviors.
//!
//! # Error Types
//!
//! - [`MediatorError`] - Errors surfaced by dispatch and publish
//! - [`RegistrationError`] - Errors raised while registering handlers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod behavior;
mod cancel;
mod error;
mod handler;
mod message;
mod pipeline;
mod provider;

// Re-exports
pub use behavior::{DynPipelineBehavior, PipelineBehavior};
pub use cancel::CancellationToken;
pub use error::{BoxError, MediatorError, RegistrationError};
pub use handler::{DynNotificationHandler, DynRequestHandler, NotificationHandler, RequestHandler};
pub use message::{Notification, Request};
pub use pipeline::{Next, Pipeline};
pub use provider::HandlerProvider;
