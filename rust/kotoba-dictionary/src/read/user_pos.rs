//! The user POS engine.

use kotoba_bytes::Bytes;
use kotoba_common::Result;
use log::{debug, trace};

use super::{pos_index::PosIndex, string_table::StringTable, token_array::TokenArrayView};
use crate::{
    data_manager::DataManager,
    user_pos_dictionary::{PosEntry, Token, UserPosDictionary},
};

/// Resolves POS names and expands user vocabulary into inflected tokens, using a
/// string table and a POS-sorted token array.
///
/// The engine holds shared handles to both buffers, so it stays valid for as
/// long as it exists regardless of what the data provider does with its own
/// handles. Construction verifies the data once; every query afterwards is a
/// read-only binary search, and the engine can be shared across threads without
/// locking. Cloning is cheap and shares the buffers.
///
/// # Examples
///
/// ```
/// use kotoba_dictionary::{
///     UserPosDictionary,
///     read::user_pos::UserPos,
///     write::user_pos_builder::{ConjugationForm, PosDefinition, UserPosBuilder},
/// };
///
/// let mut builder = UserPosBuilder::new();
/// builder
///     .add_pos(
///         PosDefinition::new("Verb")
///             .with_form(ConjugationForm::new("", "", 20))
///             .with_form(ConjugationForm::new("ed", "ed", 21)),
///     )
///     .unwrap();
/// let data = builder.finish().unwrap();
///
/// let user_pos = UserPos::new(data.token_array, data.string_array).unwrap();
/// let mut tokens = Vec::new();
/// assert!(user_pos.get_tokens("walk", "walk", "Verb", &mut tokens));
/// assert_eq!(tokens[1].value, "walked");
/// ```
#[derive(Debug, Clone)]
pub struct UserPos {
    strings: StringTable,
    tokens: TokenArrayView,
}

impl UserPos {
    /// Opens the engine over the given buffers.
    ///
    /// Fails with an invalid-format error if the token array length is not a
    /// multiple of the record size, if any record refers to a string outside the
    /// string table, if the string table is malformed or unsorted, or if the
    /// records are not ordered by POS index.
    pub fn new(token_array: Bytes, string_array: Bytes) -> Result<UserPos> {
        let strings = StringTable::new(string_array)?;
        let tokens = TokenArrayView::new(token_array)?;
        tokens.verify_string_indices(strings.len())?;
        tokens.verify_sorted()?;

        let user_pos = UserPos { strings, tokens };
        debug!(
            "loaded user POS dictionary: {} records, {} strings, {} POS",
            user_pos.tokens.len(),
            user_pos.strings.len(),
            user_pos.pos_index().distinct_pos_ids().count()
        );
        Ok(user_pos)
    }

    /// Opens the engine over the segments supplied by `manager`.
    pub fn from_data_manager(manager: &dyn DataManager) -> Result<UserPos> {
        let data = manager.user_pos_data()?;
        Self::new(data.token_array, data.string_array)
    }

    pub fn string_table(&self) -> &StringTable {
        &self.strings
    }

    pub fn token_array(&self) -> &TokenArrayView {
        &self.tokens
    }

    /// Returns the POS search interface over this engine's data.
    #[inline]
    pub fn pos_index(&self) -> PosIndex<'_> {
        PosIndex::new(&self.strings, &self.tokens)
    }

    /// Returns all POS with at least one token form, ascending by id.
    pub fn pos_entries(&self) -> impl Iterator<Item = PosEntry> + '_ {
        self.pos_index().entries()
    }
}

impl UserPosDictionary for UserPos {
    fn pos_list(&self) -> Vec<String> {
        self.pos_entries().map(|entry| entry.name).collect()
    }

    fn is_valid_pos(&self, pos: &str) -> bool {
        self.pos_index().resolve_id(pos).is_some()
    }

    fn pos_id(&self, pos: &str) -> Option<u16> {
        self.pos_index().resolve_id(pos)
    }

    fn get_tokens(&self, key: &str, value: &str, pos: &str, tokens: &mut Vec<Token>) -> bool {
        let index = self.pos_index();
        let Some(pos_id) = index.resolve_id(pos) else {
            trace!("unknown POS {pos:?}");
            return false;
        };

        let records = index.records(pos_id);
        tokens.reserve(records.len());
        for record in records {
            let key_suffix = self.strings.str_at(record.key_suffix_index as usize);
            let value_suffix = self.strings.str_at(record.value_suffix_index as usize);
            tokens.push(Token {
                key: [key, key_suffix].concat(),
                value: [value, value_suffix].concat(),
                pos_id,
                conjugation_id: record.conjugation_id,
            });
        }
        true
    }
}
