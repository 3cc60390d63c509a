//! Derive macros for `mediator`.
//!
//! - `#[derive(Request)]` with `#[request(response = Type)]`
//! - `#[derive(Notification)]`
//!
//! The generated impls refer to `::mediator`, so the derives are meant to be
//! used through the facade crate.

use proc_macro::TokenStream;

mod message;

/// Derive macro for implementing the `Request` trait.
///
/// The response type is given with a required `#[request(response = Type)]`
/// attribute.
///
/// ```rust,ignore
/// #[derive(Request)]
/// #[request(response = String)]
/// struct Ping {
///     message: String,
/// }
/// ```
#[proc_macro_derive(Request, attributes(request))]
pub fn derive_request(input: TokenStream) -> TokenStream {
    message::derive_request_impl(input)
}

/// Derive macro for implementing the `Notification` trait.
///
/// ```rust,ignore
/// #[derive(Notification)]
/// struct CustomerCreated {
///     id: u64,
/// }
/// ```
#[proc_macro_derive(Notification)]
pub fn derive_notification(input: TokenStream) -> TokenStream {
    message::derive_notification_impl(input)
}
