//! Registry of handlers and behaviors.
//!
//! Handlers and behaviors are registered through a [`RegistryBuilder`], then
//! frozen into an immutable [`Registry`] that can be shared across threads.
//!
//! Entries are keyed by the `TypeId` of the request or notification type:
//!
//! - one request handler per request type (a second one is rejected),
//! - any number of behaviors per request type, kept in registration order,
//! - any number of notification handlers per notification type, kept in
//!   registration order.
//!
//! Every entry carries a [`Lifetime`]. Scoped entries are cached per
//! [`Scope`]; resolving straight from the registry uses its root scope.
//!
//! # Example
//! ```ignore
//! let mut builder = RegistryBuilder::new();
//! builder
//!     .add_request_handler::<Ping, _>(PingHandler)?
//!     .add_behavior::<Ping, _>(LoggingBehavior::new())
//!     .add_notification_handler_with::<CustomerCreated, _, _>(Lifetime::Transient, || Crm);
//! let registry = Arc::new(builder.build());
//! ```

mod lifetime;
mod scope;

pub use lifetime::Lifetime;
pub use scope::Scope;

use lifetime::{Factory, ScopeCache, Slot};
use mediator_core::{
    DynNotificationHandler, DynPipelineBehavior, DynRequestHandler, HandlerProvider, Notification,
    NotificationHandler, PipelineBehavior, RegistrationError, Request, RequestHandler,
};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

type ErasedMap = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

type RequestSlot<R> = Slot<dyn DynRequestHandler<R>>;

fn push_slot<T>(map: &mut ErasedMap, key: TypeId, slot: Slot<T>)
where
    T: ?Sized + Send + Sync + 'static,
{
    let list = map
        .entry(key)
        .or_insert_with(|| Box::new(Vec::<Slot<T>>::new()));
    // The map is keyed by the message type, so the stored list always has this type.
    if let Some(list) = list.downcast_mut::<Vec<Slot<T>>>() {
        list.push(slot);
    }
}

fn slots<T>(map: &ErasedMap, key: TypeId) -> &[Slot<T>]
where
    T: ?Sized + Send + Sync + 'static,
{
    map.get(&key)
        .and_then(|list| list.downcast_ref::<Vec<Slot<T>>>())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

// ============================================================================
// RegistryBuilder
// ============================================================================

/// Builder for constructing a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    requests: ErasedMap,
    behaviors: ErasedMap,
    notifications: ErasedMap,
    next_slot: usize,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_id(&mut self) -> usize {
        let id = self.next_slot;
        self.next_slot += 1;
        id
    }

    fn insert_request_slot<R: Request>(
        &mut self,
        slot: RequestSlot<R>,
    ) -> Result<&mut Self, RegistrationError> {
        let key = TypeId::of::<R>();
        if self.requests.contains_key(&key) {
            return Err(RegistrationError::DuplicateHandler {
                request: std::any::type_name::<R>(),
            });
        }
        self.requests.insert(key, Box::new(slot));
        Ok(self)
    }

    /// Register the handler for request type `R` as a shared instance.
    ///
    /// Fails with [`RegistrationError::DuplicateHandler`] if `R` already has one.
    pub fn add_request_handler<R, H>(&mut self, handler: H) -> Result<&mut Self, RegistrationError>
    where
        R: Request,
        H: RequestHandler<R>,
    {
        let id = self.slot_id();
        let instance: Arc<dyn DynRequestHandler<R>> = Arc::new(handler);
        self.insert_request_slot::<R>(Slot::instance(id, instance))
    }

    /// Register the handler for request type `R`, created by `factory` according to `lifetime`.
    pub fn add_request_handler_with<R, H, F>(
        &mut self,
        lifetime: Lifetime,
        factory: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        R: Request,
        H: RequestHandler<R>,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let id = self.slot_id();
        let factory: Factory<dyn DynRequestHandler<R>> =
            Arc::new(move || Arc::new(factory()) as Arc<dyn DynRequestHandler<R>>);
        self.insert_request_slot::<R>(Slot::factory(id, lifetime, factory))
    }

    /// Append a behavior for request type `R` as a shared instance.
    pub fn add_behavior<R, B>(&mut self, behavior: B) -> &mut Self
    where
        R: Request,
        B: PipelineBehavior<R>,
    {
        let id = self.slot_id();
        let instance: Arc<dyn DynPipelineBehavior<R>> = Arc::new(behavior);
        push_slot(&mut self.behaviors, TypeId::of::<R>(), Slot::instance(id, instance));
        self
    }

    /// Append a behavior for request type `R`, created by `factory` according to `lifetime`.
    pub fn add_behavior_with<R, B, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        R: Request,
        B: PipelineBehavior<R>,
        F: Fn() -> B + Send + Sync + 'static,
    {
        let id = self.slot_id();
        let factory: Factory<dyn DynPipelineBehavior<R>> =
            Arc::new(move || Arc::new(factory()) as Arc<dyn DynPipelineBehavior<R>>);
        push_slot(
            &mut self.behaviors,
            TypeId::of::<R>(),
            Slot::factory(id, lifetime, factory),
        );
        self
    }

    /// Append a handler for notification type `N` as a shared instance.
    pub fn add_notification_handler<N, H>(&mut self, handler: H) -> &mut Self
    where
        N: Notification,
        H: NotificationHandler<N>,
    {
        let id = self.slot_id();
        let instance: Arc<dyn DynNotificationHandler<N>> = Arc::new(handler);
        push_slot(
            &mut self.notifications,
            TypeId::of::<N>(),
            Slot::instance(id, instance),
        );
        self
    }

    /// Append a handler for notification type `N`, created by `factory` according to `lifetime`.
    pub fn add_notification_handler_with<N, H, F>(
        &mut self,
        lifetime: Lifetime,
        factory: F,
    ) -> &mut Self
    where
        N: Notification,
        H: NotificationHandler<N>,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let id = self.slot_id();
        let factory: Factory<dyn DynNotificationHandler<N>> =
            Arc::new(move || Arc::new(factory()) as Arc<dyn DynNotificationHandler<N>>);
        push_slot(
            &mut self.notifications,
            TypeId::of::<N>(),
            Slot::factory(id, lifetime, factory),
        );
        self
    }

    /// Build the immutable [`Registry`].
    pub fn build(self) -> Registry {
        Registry {
            requests: self.requests,
            behaviors: self.behaviors,
            notifications: self.notifications,
            root: ScopeCache::default(),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// An immutable, thread-safe registry of handlers and behaviors.
///
/// Created by [`RegistryBuilder::build`]. Wrap it in an `Arc` to share it
/// and to open [`Scope`]s.
pub struct Registry {
    requests: ErasedMap,
    behaviors: ErasedMap,
    notifications: ErasedMap,
    root: ScopeCache,
}

impl Registry {
    /// Create a new empty builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Open a new scope over this registry.
    pub fn scope(self: &Arc<Self>) -> Scope {
        Scope::new(self.clone())
    }

    fn request_slot<R: Request>(&self) -> Option<&RequestSlot<R>> {
        self.requests
            .get(&TypeId::of::<R>())
            .and_then(|slot| slot.downcast_ref::<RequestSlot<R>>())
    }

    /// Check whether request type `R` has a handler.
    pub fn has_request_handler<R: Request>(&self) -> bool {
        self.request_slot::<R>().is_some()
    }

    /// The lifetime of the handler bound to request type `R`.
    pub fn request_handler_lifetime<R: Request>(&self) -> Option<Lifetime> {
        self.request_slot::<R>().map(Slot::lifetime)
    }

    /// Number of behaviors bound to request type `R`.
    pub fn behavior_count<R: Request>(&self) -> usize {
        slots::<dyn DynPipelineBehavior<R>>(&self.behaviors, TypeId::of::<R>()).len()
    }

    /// Number of handlers bound to notification type `N`.
    pub fn notification_handler_count<N: Notification>(&self) -> usize {
        slots::<dyn DynNotificationHandler<N>>(&self.notifications, TypeId::of::<N>()).len()
    }

    pub(crate) fn resolve_request_handler<R: Request>(
        &self,
        cache: &ScopeCache,
    ) -> Option<Arc<dyn DynRequestHandler<R>>> {
        self.request_slot::<R>().map(|slot| slot.resolve(cache))
    }

    pub(crate) fn resolve_behaviors<R: Request>(
        &self,
        cache: &ScopeCache,
    ) -> Vec<Arc<dyn DynPipelineBehavior<R>>> {
        slots::<dyn DynPipelineBehavior<R>>(&self.behaviors, TypeId::of::<R>())
            .iter()
            .map(|slot| slot.resolve(cache))
            .collect()
    }

    pub(crate) fn resolve_notification_handlers<N: Notification>(
        &self,
        cache: &ScopeCache,
    ) -> Vec<Arc<dyn DynNotificationHandler<N>>> {
        slots::<dyn DynNotificationHandler<N>>(&self.notifications, TypeId::of::<N>())
            .iter()
            .map(|slot| slot.resolve(cache))
            .collect()
    }
}

impl HandlerProvider for Registry {
    fn request_handler<R: Request>(&self) -> Option<Arc<dyn DynRequestHandler<R>>> {
        self.resolve_request_handler::<R>(&self.root)
    }

    fn behaviors<R: Request>(&self) -> Vec<Arc<dyn DynPipelineBehavior<R>>> {
        self.resolve_behaviors::<R>(&self.root)
    }

    fn notification_handlers<N: Notification>(&self) -> Vec<Arc<dyn DynNotificationHandler<N>>> {
        self.resolve_notification_handlers::<N>(&self.root)
    }
}
