//! CLI command implementations.

pub mod rb_table;
pub mod recover;
pub mod render;
pub mod version;
