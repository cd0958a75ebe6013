/// Config for a binding
/// ## Fields
/// - `shared`:
///   If `true`, the value made by the binding's factory will be stored under the binding's key
///   on the first make and returned from then on without calling the factory again.
///
///   Re-binding the key drops the stored value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub shared: bool,
}

impl Config {
    #[inline]
    #[must_use]
    pub const fn shared() -> Self {
        Self { shared: true }
    }
}
