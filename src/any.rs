use core::{
    any::{type_name, TypeId},
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

use crate::utils::thread_safety::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety};

#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub(crate) fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit_once("::").map_or(self.name, |(_, name)| name)
    }
}

/// Type-erased value stored in the container, tagged with the type it was created from.
#[derive(Clone)]
pub(crate) struct Value {
    type_info: TypeInfo,
    inner: RcAnyThreadSafety,
}

impl Value {
    #[inline]
    #[must_use]
    pub(crate) fn new<T: SendSafety + SyncSafety + 'static>(value: RcThreadSafety<T>) -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            inner: value,
        }
    }

    /// Returns the shared value back, or the type it was actually stored with.
    pub(crate) fn downcast<T: SendSafety + SyncSafety + 'static>(self) -> Result<RcThreadSafety<T>, TypeInfo> {
        let type_info = self.type_info;
        self.inner.downcast::<T>().map_err(|_| type_info)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{TypeInfo, Value};
    use crate::utils::thread_safety::RcThreadSafety;

    use alloc::string::String;

    struct Config;

    #[test]
    fn test_short_name() {
        assert_eq!(TypeInfo::of::<Config>().short_name(), "Config");
        assert_eq!(TypeInfo::of::<u8>().short_name(), "u8");
    }

    #[test]
    fn test_value_downcast() {
        let value = Value::new(RcThreadSafety::new(String::from("value")));
        assert_eq!(*value.clone().downcast::<String>().unwrap(), "value");

        let actual = value.downcast::<u32>().unwrap_err();
        assert_eq!(actual, TypeInfo::of::<String>());
    }
}
