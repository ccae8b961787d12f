//! SQLite schema definitions and SQL query constants.
//!
//! This module contains the fixed SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O. Dynamic SELECTs
//! are assembled in `query.rs` from [`SELECT_POINT`].

/// Table alias, which doubles as the column prefix read by the row mapper.
pub const ENTITY_ALIAS: &str = "e";

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS point (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(255) NOT NULL,
    description VARCHAR(255)
);
"#;

/// Base SELECT with every column aliased as `e_<column>`.
pub const SELECT_POINT: &str =
    "SELECT e.id AS e_id, e.title AS e_title, e.description AS e_description FROM point e";

pub const INSERT_POINT: &str = r#"
INSERT INTO point (title, description)
VALUES (?1, ?2)
"#;

pub const UPDATE_POINT: &str = r#"
UPDATE point
SET title = ?2, description = ?3
WHERE id = ?1
"#;

pub const DELETE_POINT: &str = r#"
DELETE FROM point
WHERE id = ?1
"#;

pub const COUNT_POINT_BY_ID: &str = r#"
SELECT COUNT(1)
FROM point
WHERE id = ?1
"#;

pub const COUNT_POINTS: &str = "SELECT COUNT(1) FROM point";

pub const PING: &str = "SELECT 1";
