//! Proxy Module
//!
//! Read-through/write-through coordination between the local cache and the
//! backing store.

mod coordinator;

pub use coordinator::Coordinator;
