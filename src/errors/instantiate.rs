use alloc::boxed::Box;

use super::container::ContainerError;

/// Error returned by a factory.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    /// The factory has nothing to produce.
    /// The container refuses to store or return such a result.
    #[error("Factory produced no value")]
    Undefined,
    /// Getting or making a dependency of the factory failed.
    #[error(transparent)]
    Dependency(Box<ContainerError>),
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl From<ContainerError> for InstantiateErrorKind {
    #[inline]
    fn from(err: ContainerError) -> Self {
        Self::Dependency(Box::new(err))
    }
}
