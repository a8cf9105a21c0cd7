//! `lift-input` — loads request streams recorded or generated elsewhere.
//!
//! | Module      | Contents                                         |
//! |-------------|--------------------------------------------------|
//! | [`loader`]  | `load_requests_csv`, `load_requests_reader`      |
//! | [`error`]   | `InputError`, `InputResult`                      |
//!
//! The loader only parses.  Range and capacity checks happen where the
//! building is known: `LiftConfig::validate_requests`, which every policy
//! and the dispatcher call before doing any work.

pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

pub use error::{InputError, InputResult};
pub use loader::{load_requests_csv, load_requests_reader};
