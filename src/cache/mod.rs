//! HTTP response caching
//!
//! `CachingTransport` decorates any `HttpTransport` and honours the standard
//! caching headers (`Cache-Control`, `Expires`, `ETag`, `Last-Modified`).
//! Entries live in a `ResponseStore`: in memory for the lifetime of the
//! process, or on disk so they survive restarts.

mod layer;
pub mod policy;
mod store;

pub use layer::CachingTransport;
pub use store::{CachedResponse, DiskStore, MemoryStore, ResponseStore};
