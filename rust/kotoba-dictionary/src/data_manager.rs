//! Providers of the raw dictionary segments.

use kotoba_bytes::Bytes;
use kotoba_common::Result;

/// The two buffers that make up a user POS dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPosData {
    /// Packed token records, see [`TokenArrayView`](crate::read::token_array::TokenArrayView).
    pub token_array: Bytes,
    /// Serialized string table, see [`StringTable`](crate::read::string_table::StringTable).
    pub string_array: Bytes,
}

impl UserPosData {
    pub fn new(token_array: Bytes, string_array: Bytes) -> UserPosData {
        UserPosData {
            token_array,
            string_array,
        }
    }
}

/// A component that owns the dictionary data of the converter and hands out
/// shared views of it.
///
/// How the data is obtained (linked-in blobs, mapped files, downloads) is up
/// to the implementation.
pub trait DataManager: Send + Sync {
    /// Returns the user POS dictionary segments.
    fn user_pos_data(&self) -> Result<UserPosData>;
}

impl DataManager for UserPosData {
    fn user_pos_data(&self) -> Result<UserPosData> {
        Ok(self.clone())
    }
}
