//! # mediator-std
//!
//! Standard implementations for the mediator dispatch framework.
//!
//! This crate provides:
//! - **Registry**: [`Registry`](registry::Registry), its builder, [`Lifetime`](registry::Lifetime)s and [`Scope`](registry::Scope)s
//! - **Scan registration**: `register_*!` macros and `RegistryBuilder::scan` (feature `inventory`)
//! - **Standard behaviors**: Logging, Tracing, Retry, Timeout (feature `timeout`)
//! - **Test doubles**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use mediator_core;

// Modules
pub mod behaviors;
#[cfg(feature = "inventory")]
pub mod collected;
pub mod registry;
pub mod testing;

#[cfg(feature = "inventory")]
pub use inventory;
