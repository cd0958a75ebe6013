use alloc::borrow::ToOwned as _;
use core::{
    any::type_name,
    fmt::{self, Debug, Formatter},
};
use parking_lot::Mutex;
use tracing::{debug, error, info_span};

use crate::{
    any::{TypeInfo, Value},
    config::Config,
    errors::{ContainerError, InstantiateErrorKind},
    factory::{boxed_factory, ErasedFactory as _},
    namespace::Namespace,
    provider::Provider,
    registry::{Binding, Registry},
    services::Services,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety, WeakThreadSafety},
};

/// Keyed store of values, factory bindings and providers.
///
/// The container is a handle: clones share the same state.
/// No lock is held while factories or provider registrations run, so both can call back into the container.
#[derive(Clone, Default)]
pub struct Container {
    pub(crate) inner: RcThreadSafety<ContainerInner>,
}

#[derive(Default)]
pub(crate) struct ContainerInner {
    registry: Mutex<Registry>,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RcThreadSafety::new(ContainerInner {
                registry: Mutex::new(Registry::new()),
            }),
        }
    }

    /// Returns `true` if both handles point to the same container
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        RcThreadSafety::ptr_eq(&self.inner, &other.inner)
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> WeakThreadSafety<ContainerInner> {
        RcThreadSafety::downgrade(&self.inner)
    }

    #[inline]
    pub(crate) fn upgrade(inner: &WeakThreadSafety<ContainerInner>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }
}

impl PartialEq for Container {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Container {}

impl Debug for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container").finish_non_exhaustive()
    }
}

impl Services for Container {
    fn get<T>(&self, key: &str) -> Result<Option<RcThreadSafety<T>>, ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        let span = info_span!("get", key, dependency = type_name::<T>());
        let _guard = span.enter();

        validate_key(key, "get")?;

        let (instance, bound) = {
            let registry = self.inner.registry.lock();
            (registry.get_instance(key), registry.get_binding(key).is_some())
        };

        if let Some(value) = instance {
            debug!("Found instance");
            return downcast(key, value).map(Some);
        }
        if bound {
            debug!("Not found instance, making");
            return self.make(key).map(Some);
        }

        debug!("Not found");
        Ok(None)
    }

    fn set_rc<T>(&self, key: &str, value: RcThreadSafety<T>) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        let span = info_span!("set", key, dependency = type_name::<T>());
        let _guard = span.enter();

        validate_key(key, "set")?;

        if self.inner.registry.lock().insert_instance(key, Value::new(value)).is_some() {
            debug!("Overwritten");
        } else {
            debug!("Stored");
        }
        Ok(())
    }

    fn set_optional<T>(&self, key: &str, value: Option<T>) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        match value {
            Some(value) => self.set(key, value),
            None => {
                validate_key(key, "set")?;

                let err = ContainerError::UndefinedValue { key: key.to_owned() };
                error!("{}", err);
                Err(err)
            }
        }
    }

    fn bind_with_config<T, F>(&self, key: &str, factory: F, config: Config) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
        F: Fn(&Container) -> Result<T, InstantiateErrorKind> + SendSafety + SyncSafety + 'static,
    {
        let span = info_span!("bind", key, dependency = type_name::<T>(), shared = config.shared);
        let _guard = span.enter();

        validate_key(key, "bind")?;

        let binding = Binding {
            factory: boxed_factory(factory),
            config,
        };
        if self.inner.registry.lock().insert_binding(key, binding).is_some() {
            debug!("Rebound");
        } else {
            debug!("Bound");
        }
        Ok(())
    }

    fn make<T>(&self, key: &str) -> Result<RcThreadSafety<T>, ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        let span = info_span!("make", key, dependency = type_name::<T>());
        let _guard = span.enter();

        validate_key(key, "make")?;

        let (binding, instance) = {
            let registry = self.inner.registry.lock();
            (registry.get_binding(key), registry.get_instance(key))
        };
        let Some(Binding { factory, config }) = binding else {
            let err = ContainerError::NoBinding { key: key.to_owned() };
            error!("{}", err);
            return Err(err);
        };

        if config.shared {
            if let Some(value) = instance {
                debug!("Found instance");
                return downcast(key, value);
            }
        }

        let value = match factory.make(self) {
            Ok(value) => value,
            Err(InstantiateErrorKind::Undefined) => {
                let err = ContainerError::FactoryReturnedUndefined { key: key.to_owned() };
                error!("{}", err);
                return Err(err);
            }
            Err(source) => {
                error!("Factory failed: {}", source);
                return Err(ContainerError::Factory {
                    key: key.to_owned(),
                    source,
                });
            }
        };

        if config.shared {
            if self
                .inner
                .registry
                .lock()
                .insert_made_instance(key, &factory, value.clone())
            {
                debug!("Cached");
            } else {
                debug!("Rebound while making, not cached");
            }
        }

        downcast(key, value)
    }

    fn register<P: Provider>(&self, provider: P) -> Result<(), ContainerError> {
        let span = info_span!("register", provider = type_name::<P>());
        let _guard = span.enter();

        provider.register()?;

        debug!("Registered");
        Ok(())
    }

    fn register_as<P: Provider>(&self, key: &str, provider: P) -> Result<(), ContainerError> {
        let span = info_span!("register", key, provider = type_name::<P>());
        let _guard = span.enter();

        validate_key(key, "register")?;

        provider.register()?;

        if self
            .inner
            .registry
            .lock()
            .insert_provider(key, Value::new(RcThreadSafety::new(provider)))
            .is_some()
        {
            debug!("Registered, previous provider replaced");
        } else {
            debug!("Registered");
        }
        Ok(())
    }

    fn provider<P: Provider>(&self, key: &str) -> Result<Option<RcThreadSafety<P>>, ContainerError> {
        let span = info_span!("provider", key, provider = type_name::<P>());
        let _guard = span.enter();

        validate_key(key, "provider")?;

        let provider = self.inner.registry.lock().get_provider(key);
        match provider {
            Some(provider) => downcast(key, provider).map(Some),
            None => {
                debug!("Not found");
                Ok(None)
            }
        }
    }

    #[inline]
    fn is_shared(&self, key: &str) -> bool {
        self.inner.registry.lock().is_shared(key)
    }

    #[inline]
    fn has(&self, key: &str) -> bool {
        self.inner
            .registry
            .lock()
            .get(key)
            .is_some_and(|entry| entry.instance.is_some() || entry.binding.is_some())
    }

    #[inline]
    fn namespace(&self, prefix: &str) -> Result<Namespace, ContainerError> {
        Namespace::new(self, prefix)
    }
}

fn validate_key(key: &str, method: &'static str) -> Result<(), ContainerError> {
    if key.is_empty() {
        let err = ContainerError::InvalidKey { method };
        error!("{}", err);
        return Err(err);
    }
    Ok(())
}

fn downcast<T>(key: &str, value: Value) -> Result<RcThreadSafety<T>, ContainerError>
where
    T: SendSafety + SyncSafety + 'static,
{
    value.downcast().map_err(|actual| {
        let err = ContainerError::IncorrectType {
            key: key.to_owned(),
            expected: TypeInfo::of::<T>(),
            actual,
        };
        error!("{}", err);
        err
    })
}
