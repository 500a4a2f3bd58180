//! Producers of user POS dictionary data.

pub mod string_table_builder;
pub mod user_pos_builder;
