//! Read access to a serialized, sorted and deduplicated string table.
//!
//! # Layout
//!
//! All integers are little-endian `u32`:
//!
//! ```text
//! +----------------------------------------------+
//! | N: number of strings                         |
//! +----------------------------------------------+
//! | offset of string 0 | length of string 0      |
//! | ...                                          |
//! | offset of string N-1 | length of string N-1  |
//! +----------------------------------------------+
//! | string 0 bytes, 0x00                         |
//! | ...                                          |
//! | string N-1 bytes, 0x00                       |
//! +----------------------------------------------+
//! ```
//!
//! Offsets are relative to the start of the table. Strings are stored in
//! ascending byte order, so the position of a string in the table is both its
//! stable index and its rank.

use kotoba_bytes::Bytes;
use kotoba_common::{Result, error::Error, verify_arg, verify_data};

use crate::search;

const COUNT_SIZE: usize = 4;
const ENTRY_SIZE: usize = 8;

/// A zero-copy view over a serialized string table.
///
/// The view keeps a clone of the [`Bytes`] handle it was created from, so the
/// backing memory outlives the table. All structural checks happen in
/// [`StringTable::new`]; lookups afterwards never fail on well-formed indices.
#[derive(Debug, Clone)]
pub struct StringTable {
    data: Bytes,
    len: usize,
}

impl StringTable {
    /// Opens a string table and verifies its layout: the entry bounds, the
    /// terminators, UTF-8 validity and the strictly ascending order that
    /// [`find`](Self::find) relies on.
    pub fn new(data: Bytes) -> Result<StringTable> {
        verify_data!(string_table, data.len() >= COUNT_SIZE);
        let len = read_u32(&data, 0) as usize;
        let header_end = len
            .checked_mul(ENTRY_SIZE)
            .and_then(|n| n.checked_add(COUNT_SIZE))
            .ok_or_else(|| Error::invalid_format("string_table", "entry count overflow"))?;
        verify_data!(header_end, header_end <= data.len());

        let table = StringTable { data, len };
        for index in 0..len {
            let (offset, size) = table.entry(index);
            verify_data!(offset, offset >= header_end);
            let end = offset
                .checked_add(size)
                .ok_or_else(|| Error::invalid_format("string_table", "entry length overflow"))?;
            verify_data!(end, end < table.data.len());
            verify_data!(terminator, table.data[end] == 0);
            std::str::from_utf8(&table.data[offset..end]).map_err(|e| {
                Error::invalid_format("string_table", format!("entry {index} is not UTF-8: {e}"))
            })?;
        }

        for index in 1..len {
            verify_data!(
                string_table,
                table.bytes_at(index - 1) < table.bytes_at(index)
            );
        }
        Ok(table)
    }

    /// Returns the number of strings in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no strings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the string at `index`.
    ///
    /// An out-of-range index is reported as an invalid argument.
    pub fn get(&self, index: usize) -> Result<&str> {
        verify_arg!(index, index < self.len);
        Ok(self.str_at(index))
    }

    /// Finds the index of `s` by binary search.
    pub fn find(&self, s: &str) -> Option<usize> {
        search::find(self.len, s.as_bytes(), |i| self.bytes_at(i))
    }

    /// Returns an iterator over all strings in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + DoubleEndedIterator + '_ {
        (0..self.len).map(|i| self.str_at(i))
    }

    /// Returns the string at `index`, which must be less than `len()`.
    #[inline]
    pub(crate) fn str_at(&self, index: usize) -> &str {
        // Every entry is checked to be UTF-8 when the table is opened.
        std::str::from_utf8(self.bytes_at(index)).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn bytes_at(&self, index: usize) -> &[u8] {
        let (offset, size) = self.entry(index);
        &self.data[offset..offset + size]
    }

    #[inline]
    fn entry(&self, index: usize) -> (usize, usize) {
        let pos = COUNT_SIZE + index * ENTRY_SIZE;
        (
            read_u32(&self.data, pos) as usize,
            read_u32(&self.data, pos + 4) as usize,
        )
    }
}

#[inline]
fn read_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}
