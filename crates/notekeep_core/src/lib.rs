//! Client-side synchronization engine for a remote notes collection.
//!
//! The engine reconciles an in-memory canonical list with a backend note
//! collection across create, read, update, delete, search-filter, and
//! retry-on-failure operations. Presentation layers consume it through
//! [`NoteStore`]'s read accessors and action entry points; the backend is
//! reached through the [`NotesApi`] gateway seam.

/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Engine error types.
pub mod error;
/// HTTP boundary against the note collection backend.
pub mod gateway;
/// Data models for notes and API payloads.
pub mod models;
/// Bounded retry for the list-fetch path.
pub mod retry;
/// Engine state, view projection, and effect runner.
pub mod store;

pub use config::Config;
pub use error::{GatewayError, ValidationError};
pub use gateway::{HttpGateway, NotesApi};
pub use models::{Note, NoteId};
pub use retry::RetryPolicy;
pub use store::{EditSession, NoteDraft, NoteStore};
