use std::collections::BTreeSet;

use kotoba_bytes::{Bytes, BytesMut};
use kotoba_common::{Result, error::Error};

/// Collects strings and serializes them into the sorted, deduplicated table
/// format read by [`StringTable`](crate::read::string_table::StringTable).
#[derive(Debug, Clone, Default)]
pub struct StringTableBuilder {
    strings: BTreeSet<String>,
}

impl StringTableBuilder {
    pub fn new() -> StringTableBuilder {
        StringTableBuilder::default()
    }

    /// Adds a string. Adding the same string again has no effect.
    pub fn add(&mut self, s: impl Into<String>) {
        self.strings.insert(s.into());
    }

    pub fn contains(&self, s: &str) -> bool {
        self.strings.contains(s)
    }

    /// Returns the number of distinct strings added so far.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns the distinct strings in table order. The position of a string in
    /// the returned vector is its index in the serialized table.
    pub fn into_sorted_vec(self) -> Vec<String> {
        self.strings.into_iter().collect()
    }

    /// Serializes the collected strings.
    pub fn finish(self) -> Result<Bytes> {
        Self::serialize_sorted(&self.into_sorted_vec())
    }

    /// Sorts, deduplicates and serializes `strings`.
    pub fn serialize<I, S>(strings: I) -> Result<Bytes>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = StringTableBuilder::new();
        for s in strings {
            builder.add(s);
        }
        builder.finish()
    }

    /// Serializes `strings`, which must already be strictly ascending.
    pub fn serialize_sorted<S: AsRef<str>>(strings: &[S]) -> Result<Bytes> {
        if strings.windows(2).any(|w| w[0].as_ref() >= w[1].as_ref()) {
            return Err(Error::invalid_arg("strings", "must be strictly ascending"));
        }
        let count = u32::try_from(strings.len())
            .map_err(|_| Error::capacity_exceeded("string_table", u32::MAX as usize))?;

        let header_size = 4 + 8 * strings.len();
        let data_size: usize = strings.iter().map(|s| s.as_ref().len() + 1).sum();
        let total = header_size + data_size;
        if total > u32::MAX as usize {
            return Err(Error::capacity_exceeded("string_table", u32::MAX as usize));
        }

        let mut buf = BytesMut::with_capacity(total);
        buf.put_u32_le(count);
        let mut offset = header_size;
        for s in strings {
            let len = s.as_ref().len();
            buf.put_u32_le(offset as u32);
            buf.put_u32_le(len as u32);
            offset += len + 1;
        }
        for s in strings {
            buf.extend_from_slice(s.as_ref().as_bytes());
            buf.put_u8(0);
        }
        debug_assert_eq!(buf.len(), total);
        Ok(buf.into_bytes())
    }
}
