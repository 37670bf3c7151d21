//! Client-side photo collection store.
//!
//! Fetches a photo listing from a remote endpoint (optionally narrowed by
//! album), caches it in memory, derives a filtered view from the user's
//! album filter, and persists that filter to durable key-value storage.

pub mod api;
pub mod storage;
pub mod store;

pub use api::{AlbumId, FetchError, HttpTransport, Photo, PhotoTransport};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::PhotoStore;
