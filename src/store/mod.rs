//! Persistence for the tracking cycle: a single pretty-printed JSON
//! document that is loaded, mutated and rewritten whole.

pub mod error;
pub mod record_store;
pub mod series;

pub use error::{StoreError, StoreResult};
pub use record_store::{today, DuplicatePolicy, RecordStore};
pub use series::{to_series, Series};
