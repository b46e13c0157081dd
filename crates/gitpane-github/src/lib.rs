//! GitHub REST adapter
//!
//! Implements the `IRemoteRepository` port from `gitpane-core` against the
//! GitHub REST API's per-file contents endpoints. All writes are single
//! file-level calls; there is no multi-file commit support, so compound
//! operations fail per item and report partial results upstream.

pub mod client;
pub mod links;
pub mod provider;

pub use client::GithubClient;
pub use provider::GithubRepositoryClient;
