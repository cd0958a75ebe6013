mod container;
mod instantiate;

pub use container::ContainerError;
pub use instantiate::InstantiateErrorKind;
