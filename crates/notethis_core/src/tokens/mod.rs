//! Token resolution and template substitution.
//!
//! # Responsibility
//! - Compute the name-to-value map for one substitution call.
//! - Rewrite bracketed placeholders in note text using that map.
//!
//! # Invariants
//! - Resolution and substitution are pure given their inputs.
//! - Unknown placeholders survive substitution verbatim.

pub mod apply;
pub mod resolve;

pub use apply::apply;
pub use resolve::{format_timestamp, local_hostname, note_id, resolve, TokenValues};
