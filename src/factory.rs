use core::marker::PhantomData;
use tracing::debug;

use crate::{
    any::Value,
    container::Container,
    errors::InstantiateErrorKind,
    utils::thread_safety::{RcThreadSafety, SendSafety, SyncSafety},
};

/// Factory with its provided type erased, so bindings of different types share one map.
pub(crate) trait ErasedFactory: SendSafety + SyncSafety {
    fn make(&self, container: &Container) -> Result<Value, InstantiateErrorKind>;
}

struct FactoryFn<F, T> {
    factory: F,
    _provides: PhantomData<fn() -> T>,
}

impl<F, T> ErasedFactory for FactoryFn<F, T>
where
    F: Fn(&Container) -> Result<T, InstantiateErrorKind> + SendSafety + SyncSafety,
    T: SendSafety + SyncSafety + 'static,
{
    fn make(&self, container: &Container) -> Result<Value, InstantiateErrorKind> {
        let provides = (self.factory)(container)?;

        debug!("Made");

        Ok(Value::new(RcThreadSafety::new(provides)))
    }
}

pub(crate) type BoxedFactory = RcThreadSafety<dyn ErasedFactory>;

#[must_use]
pub(crate) fn boxed_factory<T, F>(factory: F) -> BoxedFactory
where
    F: Fn(&Container) -> Result<T, InstantiateErrorKind> + SendSafety + SyncSafety + 'static,
    T: SendSafety + SyncSafety + 'static,
{
    RcThreadSafety::new(FactoryFn {
        factory,
        _provides: PhantomData,
    })
}
