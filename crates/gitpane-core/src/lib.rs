//! Gitpane Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Task`, `RemoteEntry`, `ClipboardSelection`, transfer batches
//! - **Events** - the `TaskEvent` queue tuple and typed refresh directives
//! - **Port definitions** - Traits for adapters: `IRemoteRepository`, `ILocalFileSystem`,
//!   `IConflictPrompt`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement. The worker and
//! conflict crates orchestrate domain entities through port interfaces, and the
//! single UI thread consumes immutable event values through the queue in
//! [`events`] - that channel is the only path from workers back to the UI.

pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
