use crate::{
    config::Config,
    container::Container,
    errors::{ContainerError, InstantiateErrorKind},
    namespace::Namespace,
    provider::Provider,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety},
};

/// Operations shared by [`Container`] and every view over it.
///
/// [`Container`] stores keys as given, [`Namespace`] prefixes them with its basename before
/// delegating, and [`crate::ProviderContext`] delegates to whichever of the two it was created from.
/// Each operation taking a key fails with [`ContainerError::InvalidKey`] if the key is empty.
pub trait Services {
    /// Gets the value stored under the key, or makes it if only a binding is registered.
    /// Returns `Ok(None)` if the key is unknown.
    ///
    /// # Errors
    /// - Returns [`ContainerError::IncorrectType`] if the value was stored with another type
    /// - Returns the errors of [`Self::make`] if the key has to be made
    fn get<T>(&self, key: &str) -> Result<Option<RcThreadSafety<T>>, ContainerError>
    where
        T: SendSafety + SyncSafety + 'static;

    /// Stores an already shared value under the key, overwriting the previous one
    #[allow(clippy::missing_errors_doc)]
    fn set_rc<T>(&self, key: &str, value: RcThreadSafety<T>) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static;

    /// Stores the value if there is one.
    ///
    /// # Errors
    /// - Returns [`ContainerError::UndefinedValue`] if the value is `None`
    fn set_optional<T>(&self, key: &str, value: Option<T>) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static;

    /// Stores the value under the key, overwriting the previous one
    #[inline]
    #[allow(clippy::missing_errors_doc)]
    fn set<T>(&self, key: &str, value: T) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.set_rc(key, RcThreadSafety::new(value))
    }

    /// Alias for [`Self::set`]
    #[inline]
    #[allow(clippy::missing_errors_doc)]
    fn instance<T>(&self, key: &str, value: T) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
    {
        self.set(key, value)
    }

    /// Registers a factory under the key, dropping the value stored for a previous binding
    #[allow(clippy::missing_errors_doc)]
    fn bind_with_config<T, F>(&self, key: &str, factory: F, config: Config) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
        F: Fn(&Container) -> Result<T, InstantiateErrorKind> + SendSafety + SyncSafety + 'static;

    /// Registers a factory under the key.
    /// If `shared` is `true`, the first made value is stored and reused.
    #[inline]
    #[allow(clippy::missing_errors_doc)]
    fn bind<T, F>(&self, key: &str, factory: F, shared: bool) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
        F: Fn(&Container) -> Result<T, InstantiateErrorKind> + SendSafety + SyncSafety + 'static,
    {
        self.bind_with_config(key, factory, Config { shared })
    }

    #[inline]
    #[allow(clippy::missing_errors_doc)]
    fn singleton<T, F>(&self, key: &str, factory: F) -> Result<(), ContainerError>
    where
        T: SendSafety + SyncSafety + 'static,
        F: Fn(&Container) -> Result<T, InstantiateErrorKind> + SendSafety + SyncSafety + 'static,
    {
        self.bind_with_config(key, factory, Config::shared())
    }

    /// Calls the factory bound to the key with the root container.
    /// For a shared binding the stored value is returned if there is one.
    ///
    /// # Errors
    /// - Returns [`ContainerError::NoBinding`] if nothing is bound to the key
    /// - Returns [`ContainerError::FactoryReturnedUndefined`] if the factory returned [`InstantiateErrorKind::Undefined`]
    /// - Returns [`ContainerError::Factory`] if the factory failed
    /// - Returns [`ContainerError::IncorrectType`] if the factory provides another type
    fn make<T>(&self, key: &str) -> Result<RcThreadSafety<T>, ContainerError>
    where
        T: SendSafety + SyncSafety + 'static;

    /// Runs the provider's registration without keeping the provider
    #[allow(clippy::missing_errors_doc)]
    fn register<P: Provider>(&self, provider: P) -> Result<(), ContainerError>;

    /// Runs the provider's registration and keeps the provider under the key
    #[allow(clippy::missing_errors_doc)]
    fn register_as<P: Provider>(&self, key: &str, provider: P) -> Result<(), ContainerError>;

    /// Gets the provider registered under the key
    #[allow(clippy::missing_errors_doc)]
    fn provider<P: Provider>(&self, key: &str) -> Result<Option<RcThreadSafety<P>>, ContainerError>;

    /// Returns `true` if the key has a stored value or a shared binding
    #[must_use]
    fn is_shared(&self, key: &str) -> bool;

    /// Returns `true` if the key has a stored value or a binding
    #[must_use]
    fn has(&self, key: &str) -> bool;

    /// Creates a view over the root container which prefixes keys with `prefix.`
    ///
    /// # Errors
    /// - Returns [`ContainerError::InvalidNamespace`] if the prefix is empty
    fn namespace(&self, prefix: &str) -> Result<Namespace, ContainerError>;
}
