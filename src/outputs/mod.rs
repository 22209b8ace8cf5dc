//! Output sinks for extracted features.
//!
//! Every [`crate::models::Feature`] is handed to two sinks:
//!
//! - [`file`]: appends the record to a local output file
//! - [`store`]: inserts the record into a MongoDB collection, plus the
//!   administrative helpers (TTL indexes, collection-existence check) that
//!   keep the per-location collections acting as an expiring cache
//!
//! The two writes are independent: neither is retried, and a failure in
//! one is never rolled back in the other.

pub mod file;
pub mod store;
