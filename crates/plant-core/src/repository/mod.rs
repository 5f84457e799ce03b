//! Repository Layer
//!
//! Key-value persistence abstraction and the record store built on it.

mod kv;
mod record_store;

pub use kv::{KvStore, MemoryKvStore};
pub use record_store::RecordStore;
pub(crate) use record_store::unique_names;
