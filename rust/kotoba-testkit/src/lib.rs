//! Test utilities for the Kotoba crates.
//!
//! This crate provides deterministic generators of synthetic dictionary content
//! and helpers for producing deliberately malformed data. It has no dependency on
//! the dictionary crates, so generated content is returned as plain values that
//! tests feed into the builders themselves.

pub mod data_gen;
