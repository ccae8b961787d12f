//! Storage backend implementations.
//!
//! This module provides the concrete implementation of the
//! `pointbook_core::storage::PointRepository` trait. The service talks to a
//! relational store through `sqlx`; SQLite is the supported backend.

pub mod sqlite;

pub use sqlite::SqliteRepository;
