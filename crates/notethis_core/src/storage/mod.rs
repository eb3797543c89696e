//! File-based note and template persistence.
//!
//! # Responsibility
//! - Enumerate, number, read and write note files in one directory.
//! - Provide template listing for the new-note flow.
//!
//! # Invariants
//! - Note file names are unique and strictly increasing by sequence
//!   number; numbering never reuses a live note's number.
//! - Written notes end with exactly one trailing newline.

pub mod note_store;
pub mod template_store;
