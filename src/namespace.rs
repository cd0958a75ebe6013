use alloc::{
    borrow::Cow,
    format,
    string::{String, ToString as _},
};
use tracing::error;

use crate::{
    config::Config,
    container::Container,
    errors::{ContainerError, InstantiateErrorKind},
    provider::Provider,
    services::Services,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety},
};

/// View over a [`Container`] which prefixes every key with `basename.` before delegating.
///
/// Empty keys are passed through unchanged, so the container rejects them as usual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    container: Container,
    basename: String,
}

impl Namespace {
    /// # Errors
    /// - Returns [`ContainerError::InvalidNamespace`] if the basename is empty
    pub fn new(container: &Container, basename: &str) -> Result<Self, ContainerError> {
        if basename.is_empty() {
            let err = ContainerError::InvalidNamespace;
            error!("{}", err);
            return Err(err);
        }

        Ok(Self {
            container: container.clone(),
            basename: basename.to_string(),
        })
    }

    #[inline]
    pub(crate) const fn from_parts(container: Container, basename: String) -> Self {
        Self { container, basename }
    }

    #[inline]
    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    #[inline]
    #[must_use]
    pub fn basename(&self) -> &str {
        &self.basename
    }

    #[inline]
    #[must_use]
    pub fn make_key(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        Some(format!("{}.{key}", self.basename))
    }

    #[inline]
    fn key<'a>(&self, key: &'a str) -> Cow<'a, str> {
        self.make_key(key).map_or(Cow::Borrowed(key), Cow::Owned)
    }
}

impl Services for Namespace {
    #[inline]
    fn get<T>(&self, key: &str) -> Result<Option<RcThreadSafety<T>>, ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.container.get(&self.key(key))
    }

    #[inline]
    fn set_rc<T>(&self, key: &str, value: RcThreadSafety<T>) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.container.set_rc(&self.key(key), value)
    }

    #[inline]
    fn set_optional<T>(&self, key: &str, value: Option<T>) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.container.set_optional(&self.key(key), value)
    }

    #[inline]
    fn bind_with_config<T, F>(&self, key: &str, factory: F, config: Config) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
        F: Fn(&Container) -> Result<T, InstantiateErrorKind> + SendSafety + SyncSafety + 'static,
    {
        self.container.bind_with_config(&self.key(key), factory, config)
    }

    #[inline]
    fn make<T>(&self, key: &str) -> Result<RcThreadSafety<T>, ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.container.make(&self.key(key))
    }

    #[inline]
    fn register<P: Provider>(&self, provider: P) -> Result<(), ContainerError> {
        self.container.register(provider)
    }

    #[inline]
    fn register_as<P: Provider>(&self, key: &str, provider: P) -> Result<(), ContainerError> {
        self.container.register_as(&self.key(key), provider)
    }

    #[inline]
    fn provider<P: Provider>(&self, key: &str) -> Result<Option<RcThreadSafety<P>>, ContainerError> {
        self.container.provider(&self.key(key))
    }

    #[inline]
    fn is_shared(&self, key: &str) -> bool {
        self.container.is_shared(&self.key(key))
    }

    #[inline]
    fn has(&self, key: &str) -> bool {
        self.container.has(&self.key(key))
    }

    #[inline]
    fn namespace(&self, prefix: &str) -> Result<Namespace, ContainerError> {
        self.container.namespace(&self.key(prefix))
    }
}
