//! Record storage for bicycles
//!
//! Two backends share one in-memory image:
//!
//! - `MemoryStore`: volatile, for tests and throwaway instances
//! - `LogStore`: append-only, checksummed record log replayed on open
//!
//! Both enforce the unique index on `model` and evaluate conditional
//! updates atomically.

mod collection;
mod errors;
mod filter;
mod log;
mod memory;
mod record;
mod store;

pub use errors::{StoreError, StoreResult};
pub use filter::{Filter, FilterExpr, FilterOperator};
pub use log::{LogStore, LOG_FILE_NAME};
pub use memory::MemoryStore;
pub use store::{FahrradStore, UpdateOutcome, VersionPrecondition};
