//! Functional core of the pointbook service.
//!
//! Pure data types, validation and merge rules for the `Point` entity, plus the
//! repository contract implemented by the storage backends. Nothing in this
//! crate performs I/O.

pub mod point;
pub mod storage;
