//! # Kotoba: user part-of-speech dictionary engine
//!
//! Kotoba resolves part-of-speech categories and expands user-registered
//! vocabulary into inflected dictionary tokens for a Japanese input-method
//! converter. The dictionary is a pair of compact, immutable buffers (a sorted
//! string table and a POS-sorted array of 8-byte token records) that are read in
//! place through zero-copy views.
//!
//! This crate re-exports the Kotoba components so they can be used through a
//! single dependency:
//!
//! * [`common`] - Error and result types shared across components
//! * [`dictionary`] - String table, token array, POS index and the user POS engine
//! * [`support::bytes`] - Shared immutable byte buffers

pub use kotoba_common as common;
pub use kotoba_dictionary as dictionary;

pub mod support {
    pub use kotoba_bytes as bytes;
}
