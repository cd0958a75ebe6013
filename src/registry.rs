use alloc::{borrow::ToOwned as _, collections::BTreeMap, string::String};

use crate::{any::Value, config::Config, factory::BoxedFactory, utils::thread_safety::RcThreadSafety};

#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) factory: BoxedFactory,
    pub(crate) config: Config,
}

/// Everything known about a single key.
/// Both fields are set at once when a shared binding was made, or when a bound key was set directly.
#[derive(Default, Clone)]
pub(crate) struct Entry {
    pub(crate) instance: Option<Value>,
    pub(crate) binding: Option<Binding>,
}

#[derive(Default)]
pub(crate) struct Registry {
    entries: BTreeMap<String, Entry>,
    providers: BTreeMap<String, Value>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            providers: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    #[inline]
    #[must_use]
    pub(crate) fn get_instance(&self, key: &str) -> Option<Value> {
        self.entries.get(key).and_then(|entry| entry.instance.clone())
    }

    #[inline]
    #[must_use]
    pub(crate) fn get_binding(&self, key: &str) -> Option<Binding> {
        self.entries.get(key).and_then(|entry| entry.binding.clone())
    }

    pub(crate) fn insert_instance(&mut self, key: &str, value: Value) -> Option<Value> {
        self.entry_mut(key).instance.replace(value)
    }

    /// Stores the value only if `factory` is still the one bound to the key.
    /// Returns `false` if the key was rebound in the meantime.
    pub(crate) fn insert_made_instance(&mut self, key: &str, factory: &BoxedFactory, value: Value) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        match &entry.binding {
            Some(binding) if RcThreadSafety::ptr_eq(&binding.factory, factory) => {
                entry.instance = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Replaces the binding under the key and drops the instance stored for the previous one.
    pub(crate) fn insert_binding(&mut self, key: &str, binding: Binding) -> Option<Binding> {
        let entry = self.entry_mut(key);
        entry.instance = None;
        entry.binding.replace(binding)
    }

    #[must_use]
    pub(crate) fn is_shared(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|entry| {
            entry.instance.is_some() || entry.binding.as_ref().is_some_and(|binding| binding.config.shared)
        })
    }

    #[inline]
    pub(crate) fn insert_provider(&mut self, key: &str, provider: Value) -> Option<Value> {
        self.providers.insert(key.to_owned(), provider)
    }

    #[inline]
    #[must_use]
    pub(crate) fn get_provider(&self, key: &str) -> Option<Value> {
        self.providers.get(key).cloned()
    }

    #[inline]
    fn entry_mut(&mut self, key: &str) -> &mut Entry {
        self.entries.entry(key.to_owned()).or_default()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{Binding, Registry};
    use crate::{any::Value, config::Config, factory::boxed_factory, utils::thread_safety::RcThreadSafety};

    fn binding(shared: bool) -> Binding {
        Binding {
            factory: boxed_factory(|_| Ok(1u8)),
            config: Config { shared },
        }
    }

    #[test]
    fn test_insert_instance() {
        let mut registry = Registry::new();

        assert!(registry.insert_instance("foo", Value::new(RcThreadSafety::new(1u8))).is_none());
        assert!(registry.insert_instance("foo", Value::new(RcThreadSafety::new(2u8))).is_some());

        let value = registry.get_instance("foo").unwrap();
        assert_eq!(*value.downcast::<u8>().unwrap(), 2);
        assert!(registry.get_binding("foo").is_none());
    }

    #[test]
    fn test_insert_binding_drops_instance() {
        let mut registry = Registry::new();

        registry.insert_binding("foo", binding(true));
        registry.insert_instance("foo", Value::new(RcThreadSafety::new(1u8)));
        assert!(registry.get_instance("foo").is_some());

        assert!(registry.insert_binding("foo", binding(true)).is_some());
        assert!(registry.get_instance("foo").is_none());
        assert!(registry.get("foo").unwrap().binding.is_some());
    }

    #[test]
    fn test_insert_made_instance_checks_binding() {
        let mut registry = Registry::new();

        let made = binding(true);
        registry.insert_binding("foo", made.clone());
        assert!(registry.insert_made_instance("foo", &made.factory, Value::new(RcThreadSafety::new(1u8))));
        assert!(registry.get_instance("foo").is_some());

        registry.insert_binding("foo", binding(true));
        assert!(!registry.insert_made_instance("foo", &made.factory, Value::new(RcThreadSafety::new(1u8))));
        assert!(registry.get_instance("foo").is_none());

        assert!(!registry.insert_made_instance("unknown", &made.factory, Value::new(RcThreadSafety::new(1u8))));
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_is_shared() {
        let mut registry = Registry::new();

        registry.insert_binding("transient", binding(false));
        registry.insert_binding("shared", binding(true));
        registry.insert_instance("instance", Value::new(RcThreadSafety::new(())));

        assert!(!registry.is_shared("transient"));
        assert!(registry.is_shared("shared"));
        assert!(registry.is_shared("instance"));
        assert!(!registry.is_shared("unknown"));
    }

    #[test]
    fn test_providers() {
        let mut registry = Registry::new();

        assert!(registry.get_provider("foo").is_none());
        registry.insert_provider("foo", Value::new(RcThreadSafety::new(())));
        assert!(registry.get_provider("foo").is_some());
    }
}
