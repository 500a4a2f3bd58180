//! Zero-copy view over the packed token record array.

use std::iter::FusedIterator;
use std::ops::Range;

use kotoba_bytes::{Bytes, BytesMut};
use kotoba_common::{Result, error::Error, verify_data};

use crate::search;

/// Size of one encoded token record in bytes.
pub const TOKEN_RECORD_SIZE: usize = 8;

/// A decoded token record.
///
/// ```text
/// +-------------------------------------+
/// | POS index           (u16, LE)       |  bytes 0..2
/// | Value suffix index  (u16, LE)       |  bytes 2..4
/// | Key suffix index    (u16, LE)       |  bytes 4..6
/// | Conjugation id      (u16, LE)       |  bytes 6..8
/// +-------------------------------------+
/// ```
///
/// The three index fields refer to entries of the accompanying
/// [`StringTable`](super::string_table::StringTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenRecord {
    pub pos_index: u16,
    pub value_suffix_index: u16,
    pub key_suffix_index: u16,
    pub conjugation_id: u16,
}

impl TokenRecord {
    pub fn new(
        pos_index: u16,
        value_suffix_index: u16,
        key_suffix_index: u16,
        conjugation_id: u16,
    ) -> TokenRecord {
        TokenRecord {
            pos_index,
            value_suffix_index,
            key_suffix_index,
            conjugation_id,
        }
    }

    /// Decodes a record from the first [`TOKEN_RECORD_SIZE`] bytes of `record`.
    ///
    /// # Panics
    ///
    /// Panics if `record` is shorter than a record.
    #[inline]
    pub fn decode(record: &[u8]) -> TokenRecord {
        TokenRecord {
            pos_index: u16::from_le_bytes([record[0], record[1]]),
            value_suffix_index: u16::from_le_bytes([record[2], record[3]]),
            key_suffix_index: u16::from_le_bytes([record[4], record[5]]),
            conjugation_id: u16::from_le_bytes([record[6], record[7]]),
        }
    }

    /// Appends the encoded record to `buf`.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.put_u16_le(self.pos_index);
        buf.put_u16_le(self.value_suffix_index);
        buf.put_u16_le(self.key_suffix_index);
        buf.put_u16_le(self.conjugation_id);
    }
}

/// Random-access view over a buffer of packed [`TokenRecord`]s.
///
/// Positions are always record ordinals; the byte stride is applied internally.
/// Records are decoded on access and the buffer is never copied.
#[derive(Debug, Clone)]
pub struct TokenArrayView {
    data: Bytes,
}

impl TokenArrayView {
    /// Creates a view over `data`, whose length must be a multiple of
    /// [`TOKEN_RECORD_SIZE`].
    pub fn new(data: Bytes) -> Result<TokenArrayView> {
        verify_data!(token_array, data.len() % TOKEN_RECORD_SIZE == 0);
        Ok(TokenArrayView { data })
    }

    /// Returns the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / TOKEN_RECORD_SIZE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the record at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<TokenRecord> {
        (index < self.len()).then(|| TokenRecord::decode(self.record_bytes(index)))
    }

    /// Returns the POS index of the record at `index`, or `None` if out of bounds.
    #[inline]
    pub fn pos_index_at(&self, index: usize) -> Option<u16> {
        (index < self.len()).then(|| self.pos_key(index))
    }

    /// Returns a lazy sequence of the records in `range`.
    ///
    /// The sequence can be cloned and re-iterated; it yields the same values
    /// each time.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or decreasing.
    pub fn range(&self, range: Range<usize>) -> TokenRecords<'_> {
        assert!(
            range.start <= range.end && range.end <= self.len(),
            "record range {range:?} out of bounds for {} records",
            self.len()
        );
        let bytes = &self.data[range.start * TOKEN_RECORD_SIZE..range.end * TOKEN_RECORD_SIZE];
        TokenRecords {
            chunks: bytes.chunks_exact(TOKEN_RECORD_SIZE),
        }
    }

    /// Returns a lazy sequence of all records.
    pub fn iter(&self) -> TokenRecords<'_> {
        self.range(0..self.len())
    }

    /// Returns the range of records whose POS index equals `pos_index`.
    pub fn equal_range(&self, pos_index: u16) -> Range<usize> {
        search::equal_range(self.len(), pos_index, |i| self.pos_key(i))
    }

    /// Verifies that the records are ordered by non-decreasing POS index.
    pub fn verify_sorted(&self) -> Result<()> {
        let mut prev = 0u16;
        for (ordinal, record) in self.iter().enumerate() {
            if record.pos_index < prev {
                return Err(Error::invalid_format(
                    "token_array",
                    format!(
                        "record {ordinal} has POS index {} after {prev}",
                        record.pos_index
                    ),
                ));
            }
            prev = record.pos_index;
        }
        Ok(())
    }

    /// Verifies that every string index embedded in the records is below
    /// `string_count`.
    pub fn verify_string_indices(&self, string_count: usize) -> Result<()> {
        for (ordinal, record) in self.iter().enumerate() {
            let max = record
                .pos_index
                .max(record.value_suffix_index)
                .max(record.key_suffix_index);
            if max as usize >= string_count {
                return Err(Error::invalid_format(
                    "token_array",
                    format!(
                        "record {ordinal} refers to string {max}, table has {string_count} entries"
                    ),
                ));
            }
        }
        Ok(())
    }

    /// POS index of the record at `index`, which must be less than `len()`.
    #[inline]
    pub(crate) fn pos_key(&self, index: usize) -> u16 {
        let record = self.record_bytes(index);
        u16::from_le_bytes([record[0], record[1]])
    }

    #[inline]
    fn record_bytes(&self, index: usize) -> &[u8] {
        let start = index * TOKEN_RECORD_SIZE;
        &self.data[start..start + TOKEN_RECORD_SIZE]
    }
}

/// A lazy, restartable sequence of decoded [`TokenRecord`]s over a record range.
#[derive(Debug, Clone)]
pub struct TokenRecords<'a> {
    chunks: std::slice::ChunksExact<'a, u8>,
}

impl Iterator for TokenRecords<'_> {
    type Item = TokenRecord;

    #[inline]
    fn next(&mut self) -> Option<TokenRecord> {
        self.chunks.next().map(TokenRecord::decode)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<TokenRecord> {
        self.chunks.nth(n).map(TokenRecord::decode)
    }
}

impl DoubleEndedIterator for TokenRecords<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<TokenRecord> {
        self.chunks.next_back().map(TokenRecord::decode)
    }
}

impl ExactSizeIterator for TokenRecords<'_> {}

impl FusedIterator for TokenRecords<'_> {}
