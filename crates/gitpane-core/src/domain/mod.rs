//! Domain entities and value types
//!
//! Pure business logic with no adapter dependencies. Everything here is
//! either a value type copied into queue events or an entity owned by
//! exactly one worker for the lifetime of a task.

pub mod clipboard;
pub mod errors;
pub mod remote_entry;
pub mod task;
pub mod transfer;
pub mod validate;
