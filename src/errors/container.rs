use alloc::string::String;

use super::instantiate::InstantiateErrorKind;
use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum ContainerError {
    #[error("Cannot .{method}() without valid key")]
    InvalidKey { method: &'static str },
    #[error("Cannot .set() [{key}] to undefined")]
    UndefinedValue { key: String },
    #[error("Cannot .make() [{key}] before .bind()")]
    NoBinding { key: String },
    #[error("When trying to .make() [{key}] the binding returned undefined")]
    FactoryReturnedUndefined { key: String },
    #[error("When trying to .make() [{key}] the binding failed")]
    Factory {
        key: String,
        #[source]
        source: InstantiateErrorKind,
    },
    #[error("Cannot instantiate Namespace without valid namespace")]
    InvalidNamespace,
    #[error("Cannot use ProviderContext after its Container was dropped")]
    ContainerDropped,
    #[error("Incorrect type under [{key}]. Actual: {actual}, expected: {expected}")]
    IncorrectType { key: String, expected: TypeInfo, actual: TypeInfo },
}
