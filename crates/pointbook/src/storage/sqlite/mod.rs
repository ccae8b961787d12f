//! SQLite storage backend implementation.
//!
//! Provides a `sqlx::SqlitePool` based implementation of `PointRepository`.
//! Every statement is hand-written and parameterized; rows are selected with
//! prefixed column aliases and converted by the row mapper.

mod error;
mod query;
mod repository;
mod row_mapper;
mod schema;

pub use repository::SqliteRepository;
