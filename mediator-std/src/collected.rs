//! Link-time registration collected via `inventory`.
//!
//! Handler crates submit registrations next to their handlers with
//! [`register_request_handler!`](crate::register_request_handler),
//! [`register_notification_handler!`](crate::register_notification_handler) and
//! [`register_pipeline_behavior!`](crate::register_pipeline_behavior). Each
//! submission remembers the module it was written in, so an application can
//! pull in everything, an explicit list of modules, or every module under a
//! prefix with [`RegistryBuilder::scan`].

use crate::registry::{Lifetime, RegistryBuilder};
use mediator_core::RegistrationError;

/// Signature of the function a submission runs against the builder.
pub type RegisterFn = fn(&mut RegistryBuilder, Lifetime) -> Result<(), RegistrationError>;

/// A registration submitted with `inventory`.
pub struct Registration {
    module: &'static str,
    line: u32,
    register: RegisterFn,
}

impl Registration {
    /// Create a new registration entry.
    pub const fn new(module: &'static str, line: u32, register: RegisterFn) -> Self {
        Self {
            module,
            line,
            register,
        }
    }

    /// Module path the registration was submitted from.
    pub fn module(&self) -> &'static str {
        self.module
    }
}

inventory::collect!(Registration);

/// Selects which submissions [`RegistryBuilder::scan`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanTarget {
    /// A module path; matches the module itself and every module nested in it.
    Module(&'static str),
    /// A module path prefix, matched textually.
    Prefix(&'static str),
}

enum Selection {
    All,
    Modules(Vec<&'static str>),
    Prefixes(Vec<&'static str>),
}

impl Selection {
    fn from_targets(targets: &[ScanTarget]) -> Result<Self, RegistrationError> {
        let Some(first) = targets.first() else {
            return Ok(Selection::All);
        };

        match first {
            ScanTarget::Module(_) => targets
                .iter()
                .map(|target| match target {
                    ScanTarget::Module(path) => Ok(*path),
                    ScanTarget::Prefix(_) => Err(mixed_targets()),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Selection::Modules),
            ScanTarget::Prefix(_) => targets
                .iter()
                .map(|target| match target {
                    ScanTarget::Prefix(prefix) => Ok(*prefix),
                    ScanTarget::Module(_) => Err(mixed_targets()),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Selection::Prefixes),
        }
    }

    fn matches(&self, module: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Modules(paths) => paths.iter().any(|path| within_module(module, path)),
            Selection::Prefixes(prefixes) => prefixes.iter().any(|prefix| module.starts_with(prefix)),
        }
    }
}

fn mixed_targets() -> RegistrationError {
    RegistrationError::InvalidArguments(
        "scan targets must be all modules or all prefixes, not a mix".to_string(),
    )
}

fn within_module(module: &str, path: &str) -> bool {
    match module.strip_prefix(path) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

impl RegistryBuilder {
    /// Apply the submitted registrations selected by `targets`.
    ///
    /// - no targets: every submission linked into the binary;
    /// - only [`ScanTarget::Module`]: submissions in those modules;
    /// - only [`ScanTarget::Prefix`]: submissions whose module path starts
    ///   with one of the prefixes.
    ///
    /// Mixing both kinds fails with [`RegistrationError::InvalidArguments`]
    /// before anything is registered. Submissions are applied ordered by
    /// module path, then by source line.
    pub fn scan(
        &mut self,
        lifetime: Lifetime,
        targets: &[ScanTarget],
    ) -> Result<&mut Self, RegistrationError> {
        let selection = Selection::from_targets(targets)?;

        let mut selected: Vec<&Registration> = inventory::iter::<Registration>
            .into_iter()
            .filter(|registration| selection.matches(registration.module))
            .collect();
        selected.sort_by_key(|registration| (registration.module, registration.line));

        tracing::debug!(
            count = selected.len(),
            ?lifetime,
            "applying collected registrations"
        );

        for registration in selected {
            (registration.register)(self, lifetime)?;
        }
        Ok(self)
    }
}

/// Submit the handler for a request type.
///
/// The expression is evaluated each time the registry needs a new instance.
///
/// ```rust,ignore
/// register_request_handler!(Ping => PingHandler);
/// ```
#[macro_export]
macro_rules! register_request_handler {
    ($request:ty => $handler:expr $(,)?) => {
        const _: () = {
            fn __register(
                builder: &mut $crate::registry::RegistryBuilder,
                lifetime: $crate::registry::Lifetime,
            ) -> ::core::result::Result<(), $crate::mediator_core::RegistrationError> {
                builder
                    .add_request_handler_with::<$request, _, _>(lifetime, || $handler)
                    .map(|_| ())
            }

            $crate::inventory::submit! {
                $crate::collected::Registration::new(::core::module_path!(), ::core::line!(), __register)
            }
        };
    };
}

/// Submit a handler for a notification type.
///
/// ```rust,ignore
/// register_notification_handler!(CustomerCreated => WelcomeMail);
/// ```
#[macro_export]
macro_rules! register_notification_handler {
    ($notification:ty => $handler:expr $(,)?) => {
        const _: () = {
            fn __register(
                builder: &mut $crate::registry::RegistryBuilder,
                lifetime: $crate::registry::Lifetime,
            ) -> ::core::result::Result<(), $crate::mediator_core::RegistrationError> {
                builder.add_notification_handler_with::<$notification, _, _>(lifetime, || $handler);
                ::core::result::Result::Ok(())
            }

            $crate::inventory::submit! {
                $crate::collected::Registration::new(::core::module_path!(), ::core::line!(), __register)
            }
        };
    };
}

/// Submit a pipeline behavior for a request type.
///
/// ```rust,ignore
/// register_pipeline_behavior!(Ping => LoggingBehavior::new());
/// ```
#[macro_export]
macro_rules! register_pipeline_behavior {
    ($request:ty => $behavior:expr $(,)?) => {
        const _: () = {
            fn __register(
                builder: &mut $crate::registry::RegistryBuilder,
                lifetime: $crate::registry::Lifetime,
            ) -> ::core::result::Result<(), $crate::mediator_core::RegistrationError> {
                builder.add_behavior_with::<$request, _, _>(lifetime, || $behavior);
                ::core::result::Result::Ok(())
            }

            $crate::inventory::submit! {
                $crate::collected::Registration::new(::core::module_path!(), ::core::line!(), __register)
            }
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_targets_select_everything() {
        let selection = Selection::from_targets(&[]).unwrap();
        assert!(selection.matches("app::billing"));
    }

    #[test]
    fn test_module_targets_match_nested_modules_only() {
        let selection = Selection::from_targets(&[ScanTarget::Module("app::crm")]).unwrap();
        assert!(selection.matches("app::crm"));
        assert!(selection.matches("app::crm::handlers"));
        assert!(!selection.matches("app::crmx"));
        assert!(!selection.matches("app::billing"));
    }

    #[test]
    fn test_prefix_targets_match_textually() {
        let selection = Selection::from_targets(&[
            ScanTarget::Prefix("app::cr"),
            ScanTarget::Prefix("lib"),
        ])
        .unwrap();
        assert!(selection.matches("app::crm"));
        assert!(selection.matches("library::x"));
        assert!(!selection.matches("app::billing"));
    }

    #[test]
    fn test_mixed_targets_are_rejected() {
        let err = Selection::from_targets(&[ScanTarget::Prefix("a"), ScanTarget::Module("b")])
            .err()
            .unwrap();
        assert!(matches!(err, RegistrationError::InvalidArguments(_)));
    }
}
