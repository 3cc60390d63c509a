//! Instance lifetimes and the slots that hand out instances.

use std::{
    any::Any,
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

/// How long a resolved handler or behavior instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
    /// A fresh instance for every resolution.
    Transient,
    /// One instance shared by every resolution.
    Singleton,
    /// One instance per [`Scope`](crate::registry::Scope).
    ///
    /// Resolving directly from a [`Registry`](crate::registry::Registry)
    /// uses the registry's root scope.
    #[default]
    Scoped,
}

pub(crate) type Factory<T> = Arc<dyn Fn() -> Arc<T> + Send + Sync>;

enum Source<T: ?Sized> {
    Instance(Arc<T>),
    Singleton {
        cell: OnceLock<Arc<T>>,
        factory: Factory<T>,
    },
    Transient(Factory<T>),
    Scoped(Factory<T>),
}

/// A registered handler or behavior together with its lifetime policy.
pub(crate) struct Slot<T: ?Sized> {
    id: usize,
    source: Source<T>,
}

impl<T> Slot<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    pub(crate) fn instance(id: usize, instance: Arc<T>) -> Self {
        Self {
            id,
            source: Source::Instance(instance),
        }
    }

    pub(crate) fn factory(id: usize, lifetime: Lifetime, factory: Factory<T>) -> Self {
        let source = match lifetime {
            Lifetime::Transient => Source::Transient(factory),
            Lifetime::Singleton => Source::Singleton {
                cell: OnceLock::new(),
                factory,
            },
            Lifetime::Scoped => Source::Scoped(factory),
        };
        Self { id, source }
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        match self.source {
            Source::Instance(_) | Source::Singleton { .. } => Lifetime::Singleton,
            Source::Transient(_) => Lifetime::Transient,
            Source::Scoped(_) => Lifetime::Scoped,
        }
    }

    /// Resolves an instance, caching scoped ones in `cache`.
    pub(crate) fn resolve(&self, cache: &ScopeCache) -> Arc<T> {
        match &self.source {
            Source::Instance(instance) => instance.clone(),
            Source::Singleton { cell, factory } => cell.get_or_init(|| factory()).clone(),
            Source::Transient(factory) => factory(),
            Source::Scoped(factory) => cache.get_or_create(self.id, || factory()),
        }
    }
}

/// Instances created for one scope, keyed by slot id.
#[derive(Default)]
pub(crate) struct ScopeCache {
    instances: Mutex<HashMap<usize, Box<dyn Any + Send + Sync>>>,
}

impl ScopeCache {
    fn lock(&self) -> MutexGuard<'_, HashMap<usize, Box<dyn Any + Send + Sync>>> {
        self.instances.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The factory runs without the lock held. When two callers race on the
    /// same slot, the first insert wins and both get that instance.
    pub(crate) fn get_or_create<T>(&self, slot: usize, create: impl FnOnce() -> Arc<T>) -> Arc<T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if let Some(existing) = self
            .lock()
            .get(&slot)
            .and_then(|instance| instance.downcast_ref::<Arc<T>>())
        {
            return existing.clone();
        }

        let created = create();
        self.lock()
            .entry(slot)
            .or_insert_with(|| Box::new(created.clone()))
            .downcast_ref::<Arc<T>>()
            .cloned()
            .unwrap_or(created)
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }
}
