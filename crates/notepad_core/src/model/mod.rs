//! Domain model for notes.
//!
//! # Responsibility
//! - Define the note record shared by storage, services and formatters.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` and owned by one user.

pub mod note;
