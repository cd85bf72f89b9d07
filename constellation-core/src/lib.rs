//! Constellation core library: the registry store for named project collections.
//!
//! - [`types`]: newtypes, the settings document, legacy read shapes
//! - [`error`]: [`StoreError`]
//! - [`store`]: [`Store`] with load / save, views and mutators
//! - [`open_cache`]: the open-set side cache
//! - [`migrate`]: legacy `open` flag migration
//! - [`host`] / [`session`]: driving the editor alongside the store

pub mod error;
pub mod host;
pub mod migrate;
pub mod open_cache;
pub mod paths;
pub mod session;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use host::{HostError, ProjectHost};
pub use migrate::MigrationOutcome;
pub use store::Store;
pub use types::{Constellation, ConstellationName, CreatePolicy, Settings};
