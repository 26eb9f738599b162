//! Model stores usable without an ORM.

mod json;

pub use json::{JsonRecord, JsonRecordStore};
