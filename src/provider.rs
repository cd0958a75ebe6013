use alloc::borrow::ToOwned as _;
use alloc::string::String;
use core::fmt::{self, Debug, Formatter};
use tracing::error;

use crate::{
    config::Config,
    container::{Container, ContainerInner},
    errors::{ContainerError, InstantiateErrorKind},
    namespace::Namespace,
    services::Services,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety, WeakThreadSafety},
};

/// Group of related registrations, performed in one step by [`Services::register`] or [`Services::register_as`].
///
/// Providers usually keep a [`ProviderContext`] and register through it,
/// so the same provider works against a container or under a namespace.
pub trait Provider: SendSafety + SyncSafety + 'static {
    #[allow(clippy::missing_errors_doc)]
    fn register(&self) -> Result<(), ContainerError>;
}

/// Target a provider registers against.
///
/// The context doesn't keep the container alive, so a provider stored in its own container is dropped with it.
/// Once the container is dropped, operations fail with [`ContainerError::ContainerDropped`].
#[derive(Clone)]
pub struct ProviderContext {
    container: WeakThreadSafety<ContainerInner>,
    basename: Option<String>,
}

pub(crate) enum Target {
    Container(Container),
    Namespace(Namespace),
}

impl ProviderContext {
    #[inline]
    #[must_use]
    pub fn new(target: impl Into<Self>) -> Self {
        target.into()
    }

    /// Returns the root container, also when created from a namespace.
    /// `None` if the container was dropped.
    #[inline]
    #[must_use]
    pub fn get_container(&self) -> Option<Container> {
        Container::upgrade(&self.container)
    }

    /// Returns the namespace the context was created from.
    /// `None` if it was created from a container, or if the container was dropped.
    #[must_use]
    pub fn get_namespace(&self) -> Option<Namespace> {
        let basename = self.basename.as_ref()?;
        Some(Namespace::from_parts(self.get_container()?, basename.clone()))
    }

    fn target(&self) -> Result<Target, ContainerError> {
        let Some(container) = self.get_container() else {
            let err = ContainerError::ContainerDropped;
            error!("{}", err);
            return Err(err);
        };

        Ok(match &self.basename {
            Some(basename) => Target::Namespace(Namespace::from_parts(container, basename.clone())),
            None => Target::Container(container),
        })
    }
}

impl From<&Container> for ProviderContext {
    fn from(container: &Container) -> Self {
        Self {
            container: container.downgrade(),
            basename: None,
        }
    }
}

impl From<&Namespace> for ProviderContext {
    fn from(namespace: &Namespace) -> Self {
        Self {
            container: namespace.container().downgrade(),
            basename: Some(namespace.basename().to_owned()),
        }
    }
}

impl PartialEq for ProviderContext {
    fn eq(&self, other: &Self) -> bool {
        WeakThreadSafety::ptr_eq(&self.container, &other.container) && self.basename == other.basename
    }
}

impl Eq for ProviderContext {}

impl Debug for ProviderContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderContext")
            .field("basename", &self.basename)
            .finish_non_exhaustive()
    }
}

impl Services for ProviderContext {
    #[inline]
    fn get<T>(&self, key: &str) -> Result<Option<RcThreadSafety<T>>, ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        delegate!(self.target()? => get(key))
    }

    #[inline]
    fn set_rc<T>(&self, key: &str, value: RcThreadSafety<T>) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        delegate!(self.target()? => set_rc(key, value))
    }

    #[inline]
    fn set_optional<T>(&self, key: &str, value: Option<T>) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        delegate!(self.target()? => set_optional(key, value))
    }

    #[inline]
    fn bind_with_config<T, F>(&self, key: &str, factory: F, config: Config) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
        F: Fn(&Container) -> Result<T, InstantiateErrorKind> + SendSafety + SyncSafety + 'static,
    {
        delegate!(self.target()? => bind_with_config(key, factory, config))
    }

    #[inline]
    fn make<T>(&self, key: &str) -> Result<RcThreadSafety<T>, ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        delegate!(self.target()? => make(key))
    }

    #[inline]
    fn register<P: Provider>(&self, provider: P) -> Result<(), ContainerError> {
        delegate!(self.target()? => register(provider))
    }

    #[inline]
    fn register_as<P: Provider>(&self, key: &str, provider: P) -> Result<(), ContainerError> {
        delegate!(self.target()? => register_as(key, provider))
    }

    #[inline]
    fn provider<P: Provider>(&self, key: &str) -> Result<Option<RcThreadSafety<P>>, ContainerError> {
        delegate!(self.target()? => provider(key))
    }

    #[inline]
    fn is_shared(&self, key: &str) -> bool {
        self.target().is_ok_and(|target| delegate!(target => is_shared(key)))
    }

    #[inline]
    fn has(&self, key: &str) -> bool {
        self.target().is_ok_and(|target| delegate!(target => has(key)))
    }

    #[inline]
    fn namespace(&self, prefix: &str) -> Result<Namespace, ContainerError> {
        delegate!(self.target()? => namespace(prefix))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{Provider, ProviderContext};
    use crate::{container::Container, errors::ContainerError, services::Services};

    use alloc::string::String;
    use core::sync::atomic::{AtomicU8, Ordering};

    #[test]
    fn test_from_container() {
        let container = Container::new();

        let context = ProviderContext::new(&container);
        assert_eq!(context.get_container(), Some(container.clone()));
        assert!(context.get_namespace().is_none());

        context.set("foo", 1u8).unwrap();
        assert_eq!(*container.get::<u8>("foo").unwrap().unwrap(), 1);
    }

    #[test]
    fn test_from_namespace() {
        let container = Container::new();
        let namespace = container.namespace("ns").unwrap();

        let context = ProviderContext::new(&namespace);
        assert_eq!(context.get_container(), Some(container.clone()));
        assert_eq!(context.get_namespace(), Some(namespace.clone()));
        assert_eq!(context, ProviderContext::new(&namespace));
        assert_ne!(context, ProviderContext::new(&container));

        context.bind("foo", |_| Ok(String::from("made")), false).unwrap();
        assert!(context.has("foo"));
        assert!(container.has("ns.foo"));
        assert!(!container.has("foo"));
        assert_eq!(*context.make::<String>("foo").unwrap(), "made");
    }

    #[test]
    fn test_namespace_from_namespaced_context() {
        let container = Container::new();
        let context = ProviderContext::new(&container.namespace("a").unwrap());

        let nested = context.namespace("b").unwrap();
        assert_eq!(nested.basename(), "a.b");
    }

    #[derive(Debug)]
    struct CountingProvider {
        context: ProviderContext,
        calls: AtomicU8,
    }

    impl Provider for CountingProvider {
        fn register(&self) -> Result<(), ContainerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.context.singleton("counter", |_| Ok(0u8))
        }
    }

    #[test]
    fn test_register_through_namespaced_context() {
        let container = Container::new();
        let namespace = container.namespace("ns").unwrap();
        let context = ProviderContext::new(&namespace);

        context
            .register_as(
                "counting",
                CountingProvider {
                    context: context.clone(),
                    calls: AtomicU8::new(0),
                },
            )
            .unwrap();

        assert!(container.is_shared("ns.counter"));
        let provider = container.provider::<CountingProvider>("ns.counting").unwrap().unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_container() {
        let container = Container::new();
        let context = ProviderContext::new(&container.namespace("ns").unwrap());
        drop(container);

        assert!(context.get_container().is_none());
        assert!(context.get_namespace().is_none());
        assert!(matches!(context.set("foo", 1u8), Err(ContainerError::ContainerDropped)));
        assert!(matches!(context.get::<u8>("foo"), Err(ContainerError::ContainerDropped)));
        assert!(!context.has("foo"));
        assert!(!context.is_shared("foo"));
    }
}
