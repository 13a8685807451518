//! Data models for the note collection and its API payloads.

pub mod note;


pub use note::{validate_fields, CreateNoteRequest, Note, NoteId, UpdateNoteRequest};
