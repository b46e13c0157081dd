//! Port definitions - trait interfaces implemented by adapter crates

pub mod conflict_prompt;
pub mod local_filesystem;
pub mod remote_repository;

pub use conflict_prompt::IConflictPrompt;
pub use local_filesystem::{ILocalFileSystem, LocalEntry, LocalStat};
pub use remote_repository::{FileContent, IRemoteRepository, RepositoryInfo};
