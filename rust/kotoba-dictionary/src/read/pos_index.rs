use std::ops::Range;

use super::{
    string_table::StringTable,
    token_array::{TokenArrayView, TokenRecords},
};
use crate::user_pos_dictionary::PosEntry;

/// POS lookups over a string table and a POS-sorted token array.
///
/// A POS id is the string table index of the POS name. Because the string table
/// is sorted by bytes and the token array is sorted by POS index, ascending ids
/// and ascending names describe the same order, and both sides can be searched
/// with the same bound-search routines.
#[derive(Debug, Clone, Copy)]
pub struct PosIndex<'a> {
    strings: &'a StringTable,
    tokens: &'a TokenArrayView,
}

impl<'a> PosIndex<'a> {
    pub fn new(strings: &'a StringTable, tokens: &'a TokenArrayView) -> PosIndex<'a> {
        PosIndex { strings, tokens }
    }

    /// Resolves a POS name to its id.
    ///
    /// Returns `None` unless `name` is in the string table and at least one
    /// token record carries its index. Suffix strings share the table with POS
    /// names, so presence in the table alone does not make a POS.
    pub fn resolve_id(&self, name: &str) -> Option<u16> {
        let index = self.strings.find(name)?;
        let pos_id = u16::try_from(index).ok()?;
        let range = self.record_range(pos_id);
        (!range.is_empty()).then_some(pos_id)
    }

    /// Returns the range of records with the given POS id. The range is empty
    /// when no record matches.
    #[inline]
    pub fn record_range(&self, pos_id: u16) -> Range<usize> {
        self.tokens.equal_range(pos_id)
    }

    /// Returns the records with the given POS id, in storage order.
    pub fn records(&self, pos_id: u16) -> TokenRecords<'a> {
        self.tokens.range(self.record_range(pos_id))
    }

    /// Returns the distinct POS ids present in the token array, ascending.
    pub fn distinct_pos_ids(&self) -> DistinctPosIds<'a> {
        DistinctPosIds {
            records: self.tokens.iter(),
            last: None,
        }
    }

    /// Returns the distinct POS entries present in the token array, ascending by id.
    pub fn entries(self) -> impl Iterator<Item = PosEntry> + 'a {
        let strings = self.strings;
        self.distinct_pos_ids().map(move |id| PosEntry {
            name: strings.str_at(id as usize).to_string(),
            id,
        })
    }
}

/// Iterator over the first POS index of each run of equal POS indices.
#[derive(Debug, Clone)]
pub struct DistinctPosIds<'a> {
    records: TokenRecords<'a>,
    last: Option<u16>,
}

impl Iterator for DistinctPosIds<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        for record in self.records.by_ref() {
            if self.last != Some(record.pos_index) {
                self.last = Some(record.pos_index);
                return Some(record.pos_index);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.records.len()))
    }
}

impl std::iter::FusedIterator for DistinctPosIds<'_> {}
