//! Read-side views over user POS dictionary data.

pub mod pos_index;
pub mod string_table;
pub mod token_array;
pub mod user_pos;
