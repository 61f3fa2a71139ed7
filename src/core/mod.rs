//! Core types shared across the crate.

pub mod language;

pub use language::Language;
