//! Keyed service container.
//!
//! Values are stored under string keys, either directly or through factory bindings which are
//! made on demand and optionally kept after the first make.
//! [`Namespace`] prefixes keys, [`Provider`] groups registrations.
//!
//! ```
//! use service_container::{Container, Services as _};
//!
//! let container = Container::new();
//! container.set("db.url", "postgres://localhost").unwrap();
//! container
//!     .singleton("db.pool", |container| {
//!         let url = container.get::<&str>("db.url")?.ok_or(service_container::InstantiateErrorKind::Undefined)?;
//!         Ok(format!("pool({url})"))
//!     })
//!     .unwrap();
//!
//! let db = container.namespace("db").unwrap();
//! assert_eq!(*db.get::<String>("pool").unwrap().unwrap(), "pool(postgres://localhost)");
//! ```
#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod factory;
pub(crate) mod namespace;
pub(crate) mod provider;
pub(crate) mod registry;
pub(crate) mod services;

pub mod utils;

pub use any::TypeInfo;
pub use config::Config;
pub use container::Container;
pub use errors::{ContainerError, InstantiateErrorKind};
pub use namespace::Namespace;
pub use provider::{Provider, ProviderContext};
pub use services::Services;
pub use utils::thread_safety::RcThreadSafety;
