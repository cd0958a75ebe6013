/// Forwards a call to the namespace or the container a [`crate::provider::Target`] points to.
macro_rules! delegate {
    ($target:expr => $method:ident($($arg:expr),* $(,)?)) => {
        match $target {
            $crate::provider::Target::Namespace(namespace) => namespace.$method($($arg),*),
            $crate::provider::Target::Container(container) => container.$method($($arg),*),
        }
    };
}
