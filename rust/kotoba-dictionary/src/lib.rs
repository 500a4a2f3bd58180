//! User part-of-speech dictionary for the Kotoba converter.
//!
//! When a user registers a word, the converter needs every inflected variant of
//! it as a conversion candidate. This crate answers that from two compact,
//! read-only buffers:
//!
//! - a [string table](read::string_table) of POS names and key/value suffixes,
//!   sorted and deduplicated;
//! - a [token array](read::token_array) of 8-byte records
//!   `(pos index, value suffix index, key suffix index, conjugation id)`,
//!   sorted by POS index.
//!
//! A POS id is the string table index of the POS name, so the records of one POS
//! form a contiguous run that is located by binary search. The
//! [`UserPos`](read::user_pos::UserPos) engine combines both views and
//! implements the [`UserPosDictionary`] capability consumed by the rest of the
//! converter. The [`write`] module produces the buffers from POS definitions.

pub mod data_manager;
pub mod read;
pub mod search;
pub mod user_dictionary;
pub mod user_pos_dictionary;
pub mod write;

pub use data_manager::{DataManager, UserPosData};
pub use read::user_pos::UserPos;
pub use user_pos_dictionary::{PosEntry, Token, UserPosDictionary};
