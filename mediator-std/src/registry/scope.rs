//! Scoped resolution.

use super::{Registry, lifetime::ScopeCache};
use mediator_core::{
    DynNotificationHandler, DynPipelineBehavior, DynRequestHandler, HandlerProvider, Notification,
    Request,
};
use std::sync::Arc;

/// A logical session over a [`Registry`], such as one inbound HTTP request.
///
/// [`Lifetime::Scoped`](super::Lifetime::Scoped) entries resolve to one
/// instance per scope. The instances are dropped with the scope.
pub struct Scope {
    registry: Arc<Registry>,
    cache: ScopeCache,
}

impl Scope {
    /// Open a new scope over `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            cache: ScopeCache::default(),
        }
    }

    /// The registry this scope resolves from.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Number of scoped instances created so far in this scope.
    pub fn instance_count(&self) -> usize {
        self.cache.len()
    }
}

impl HandlerProvider for Scope {
    fn request_handler<R: Request>(&self) -> Option<Arc<dyn DynRequestHandler<R>>> {
        self.registry.resolve_request_handler::<R>(&self.cache)
    }

    fn behaviors<R: Request>(&self) -> Vec<Arc<dyn DynPipelineBehavior<R>>> {
        self.registry.resolve_behaviors::<R>(&self.cache)
    }

    fn notification_handlers<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationHandler<N>>> {
        self.registry.resolve_notification_handlers::<N>(&self.cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Lifetime, RegistryBuilder};
    use mediator_core::{CancellationToken, MediatorError, RequestHandler};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Count;

    impl Request for Count {
        type Response = usize;
    }

    struct Counter {
        calls: AtomicUsize,
    }

    impl RequestHandler<Count> for Counter {
        async fn handle(
            &self,
            _request: &Count,
            _cancel: &CancellationToken,
        ) -> Result<usize, MediatorError> {
            Ok(self.calls.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    fn registry() -> Arc<Registry> {
        let mut builder = RegistryBuilder::new();
        builder
            .add_request_handler_with::<Count, _, _>(Lifetime::Scoped, || Counter {
                calls: AtomicUsize::new(0),
            })
            .unwrap();
        Arc::new(builder.build())
    }

    #[tokio::test]
    async fn test_scoped_instance_is_shared_within_scope() {
        let registry = registry();
        let scope = registry.scope();
        let cancel = CancellationToken::new();

        let first = scope.request_handler::<Count>().unwrap();
        let second = scope.request_handler::<Count>().unwrap();
        assert_eq!(first.handle_dyn(&Count, &cancel).await.unwrap(), 1);
        assert_eq!(second.handle_dyn(&Count, &cancel).await.unwrap(), 2);
        assert_eq!(scope.instance_count(), 1);
    }

    #[tokio::test]
    async fn test_new_scope_gets_new_instance() {
        let registry = registry();
        let cancel = CancellationToken::new();

        let a = registry.scope().request_handler::<Count>().unwrap();
        let b = registry.scope().request_handler::<Count>().unwrap();
        assert_eq!(a.handle_dyn(&Count, &cancel).await.unwrap(), 1);
        assert_eq!(b.handle_dyn(&Count, &cancel).await.unwrap(), 1);
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_scopes_do_not_touch_root() {
        let registry = registry();
        let scope = Scope::new(registry.clone());
        scope.request_handler::<Count>().unwrap();
        assert_eq!(scope.instance_count(), 1);
        assert!(Arc::ptr_eq(scope.registry(), &registry));
    }
}
