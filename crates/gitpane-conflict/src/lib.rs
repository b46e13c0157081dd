//! Pre-transfer conflict resolution
//!
//! Before an upload or download task is spawned, the resolver checks the
//! batch's root items against their destinations, asks the user one
//! question if anything conflicts, and hands the workers a resolved batch
//! tagged with pre-check results they can trust without re-asking.

pub mod error;
pub mod resolver;

pub use error::ConflictError;
pub use resolver::ConflictResolver;
