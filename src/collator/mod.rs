//! NDJSON collator
//!
//! Finds the newest `.ndjson` export matching a glob-like pattern in an
//! object store and streams its records, one JSON document per line.
//!
//! # Overview
//!
//! - [`FileSearch`] - discovery and byte streaming capability
//! - [`ObjectStoreSearch`] - `FileSearch` over S3, R2, GCS, Azure and local paths
//! - [`NdjsonStream`] - byte stream to record stream decoder
//! - [`NdjsonCollator`] - picks the latest file and decodes it
//!
//! File names are expected to sort chronologically (e.g. an ISO date or a
//! timestamp in the name); the lexicographically greatest match wins.

mod latest;
mod ndjson;
mod search;
mod source;

pub use latest::NdjsonCollator;
pub use ndjson::NdjsonStream;
pub use search::{glob_to_regex, FileSearch, ObjectStoreSearch, SearchFile};
pub use source::ObjectSource;
