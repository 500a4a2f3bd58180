//! Expansion of user-registered vocabulary into dictionary tokens.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::user_pos_dictionary::{Token, UserPosDictionary};

/// A vocabulary entry as registered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserEntry {
    /// Reading of the stem.
    pub key: String,
    /// Written form of the stem.
    pub value: String,
    /// POS name selected by the user.
    pub pos: String,
}

impl UserEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, pos: impl Into<String>) -> Self {
        UserEntry {
            key: key.into(),
            value: value.into(),
            pos: pos.into(),
        }
    }
}

/// Expands `entries` through `dictionary`, appending all produced tokens to
/// `tokens`.
///
/// Entries with an empty reading or written form, and entries whose POS is
/// unknown, contribute nothing. Returns the number of entries that produced
/// tokens.
pub fn expand_entries<'e, D, I>(dictionary: &D, entries: I, tokens: &mut Vec<Token>) -> usize
where
    D: UserPosDictionary + ?Sized,
    I: IntoIterator<Item = &'e UserEntry>,
{
    let mut matched = 0;
    for entry in entries {
        if entry.key.is_empty() || entry.value.is_empty() {
            trace!("skipping user entry with empty key or value: {entry:?}");
            continue;
        }
        if dictionary.get_tokens(&entry.key, &entry.value, &entry.pos, tokens) {
            matched += 1;
        } else {
            trace!("no tokens for user entry {entry:?}");
        }
    }
    matched
}
