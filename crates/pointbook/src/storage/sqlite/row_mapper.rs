//! SQLite row conversion.
//!
//! Pure functions for converting prefixed result rows into domain types.

use pointbook_core::point::Point;
use sqlx::{sqlite::SqliteRow, Row};

/// Convert a row to a Point, reading the `<prefix>_id`, `<prefix>_title`
/// and `<prefix>_description` columns.
///
/// Fails with `sqlx::Error::ColumnDecode` when a stored value has an
/// incompatible type, and with `sqlx::Error::ColumnNotFound` when a column
/// is missing.
pub fn row_to_point(row: &SqliteRow, prefix: &str) -> sqlx::Result<Point> {
    let id: i64 = row.try_get(format!("{prefix}_id").as_str())?;
    let title: String = row.try_get(format!("{prefix}_title").as_str())?;
    let description: Option<String> = row.try_get(format!("{prefix}_description").as_str())?;

    Ok(Point {
        id: Some(id),
        title,
        description,
    })
}
