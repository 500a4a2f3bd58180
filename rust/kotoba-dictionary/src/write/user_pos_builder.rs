//! Generation of user POS dictionary data from POS definitions.

use std::collections::HashSet;

use kotoba_bytes::BytesMut;
use kotoba_common::{Result, error::Error};
use log::debug;
use serde::{Deserialize, Serialize};

use super::string_table_builder::StringTableBuilder;
use crate::{
    data_manager::UserPosData,
    read::token_array::{TOKEN_RECORD_SIZE, TokenRecord},
};

/// One inflected form of a POS: the suffixes appended to a stem and the
/// conjugation id of the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConjugationForm {
    #[serde(default)]
    pub key_suffix: String,
    #[serde(default)]
    pub value_suffix: String,
    pub conjugation_id: u16,
}

impl ConjugationForm {
    pub fn new(
        key_suffix: impl Into<String>,
        value_suffix: impl Into<String>,
        conjugation_id: u16,
    ) -> ConjugationForm {
        ConjugationForm {
            key_suffix: key_suffix.into(),
            value_suffix: value_suffix.into(),
            conjugation_id,
        }
    }
}

/// A POS name and its conjugation forms, in the order tokens should be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosDefinition {
    pub name: String,
    pub forms: Vec<ConjugationForm>,
}

impl PosDefinition {
    pub fn new(name: impl Into<String>) -> PosDefinition {
        PosDefinition {
            name: name.into(),
            forms: Vec::new(),
        }
    }

    pub fn with_form(mut self, form: ConjugationForm) -> PosDefinition {
        self.forms.push(form);
        self
    }
}

/// Builds the token array and string table of a user POS dictionary.
///
/// POS names and all suffixes are interned into a single string table, so a
/// POS id is the table index of its name. Records are ordered by POS id; the
/// forms of one POS keep their definition order.
#[derive(Debug, Default)]
pub struct UserPosBuilder {
    definitions: Vec<PosDefinition>,
    names: HashSet<String>,
}

impl UserPosBuilder {
    /// The number of strings addressable by the 16-bit indices of a record.
    pub const MAX_STRINGS: usize = u16::MAX as usize + 1;

    pub fn new() -> UserPosBuilder {
        UserPosBuilder::default()
    }

    /// Creates a builder from a sequence of definitions.
    pub fn from_definitions<I>(definitions: I) -> Result<UserPosBuilder>
    where
        I: IntoIterator<Item = PosDefinition>,
    {
        let mut builder = UserPosBuilder::new();
        for definition in definitions {
            builder.add_pos(definition)?;
        }
        Ok(builder)
    }

    /// Adds a POS definition.
    ///
    /// Fails if the definition has no forms or if a POS with the same name was
    /// already added.
    pub fn add_pos(&mut self, definition: PosDefinition) -> Result<()> {
        if definition.forms.is_empty() {
            return Err(Error::invalid_arg(
                "definition",
                format!("POS {:?} has no forms", definition.name),
            ));
        }
        if !self.names.insert(definition.name.clone()) {
            return Err(Error::invalid_arg(
                "definition",
                format!("POS {:?} is defined twice", definition.name),
            ));
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Returns the number of POS added so far.
    pub fn pos_count(&self) -> usize {
        self.definitions.len()
    }

    /// Encodes the collected definitions.
    pub fn finish(self) -> Result<UserPosData> {
        let mut strings = StringTableBuilder::new();
        for definition in &self.definitions {
            strings.add(definition.name.as_str());
            for form in &definition.forms {
                strings.add(form.key_suffix.as_str());
                strings.add(form.value_suffix.as_str());
            }
        }
        if strings.len() > Self::MAX_STRINGS {
            return Err(Error::capacity_exceeded("string_table", Self::MAX_STRINGS));
        }
        let strings = strings.into_sorted_vec();
        let index_of = |s: &str| -> Result<u16> {
            let index = strings
                .binary_search_by(|probe| probe.as_str().cmp(s))
                .map_err(|_| Error::invalid_operation("string interning"))?;
            u16::try_from(index)
                .map_err(|_| Error::capacity_exceeded("string_table", Self::MAX_STRINGS))
        };

        let mut records = Vec::new();
        for definition in &self.definitions {
            let pos_index = index_of(&definition.name)?;
            for form in &definition.forms {
                records.push(TokenRecord::new(
                    pos_index,
                    index_of(&form.value_suffix)?,
                    index_of(&form.key_suffix)?,
                    form.conjugation_id,
                ));
            }
        }
        // Stable, so forms stay in definition order within a POS.
        records.sort_by_key(|record| record.pos_index);

        let mut token_array = BytesMut::with_capacity(records.len() * TOKEN_RECORD_SIZE);
        for record in &records {
            record.encode_into(&mut token_array);
        }
        let string_array = StringTableBuilder::serialize_sorted(&strings)?;

        debug!(
            "built user POS dictionary: {} POS, {} records, {} strings ({} + {} bytes)",
            self.definitions.len(),
            records.len(),
            strings.len(),
            token_array.len(),
            string_array.len()
        );
        Ok(UserPosData::new(token_array.into_bytes(), string_array))
    }
}
