//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Expiry: Removes expired local cache entries once per cache TTL

mod expiry;

pub use expiry::spawn_expiry_task;
