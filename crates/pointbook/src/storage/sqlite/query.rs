//! Dynamic SELECT construction.
//!
//! Filters become `?` placeholders with the values kept aside for binding,
//! and ordering comes from the closed `PointColumn` set. No caller-supplied
//! text is ever spliced into the SQL.

use pointbook_core::storage::{PageRequest, PointColumn, PointCriteria};

use super::schema::{ENTITY_ALIAS, SELECT_POINT};

/// A value to bind to a placeholder, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
}

/// A SELECT statement and the values for its placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub sql: String,
    pub binds: Vec<SqlValue>,
}

/// Escapes `LIKE` wildcards so the fragment matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Builds the point SELECT for the given page and criteria.
///
/// Rows are always ordered, falling back to `id ASC`, so that paging is
/// deterministic.
pub fn build_select(page: Option<&PageRequest>, criteria: Option<&PointCriteria>) -> SelectQuery {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<SqlValue> = Vec::new();

    if let Some(criteria) = criteria {
        if let Some(id) = criteria.id {
            conditions.push(format!("{ENTITY_ALIAS}.id = ?"));
            binds.push(SqlValue::Integer(id));
        }
        if let Some(title) = &criteria.title {
            conditions.push(format!("{ENTITY_ALIAS}.title = ?"));
            binds.push(SqlValue::Text(title.clone()));
        }
        if let Some(fragment) = &criteria.title_contains {
            conditions.push(format!("{ENTITY_ALIAS}.title LIKE ? ESCAPE '\\'"));
            binds.push(SqlValue::Text(escape_like(fragment)));
        }
        if let Some(fragment) = &criteria.description_contains {
            conditions.push(format!("{ENTITY_ALIAS}.description LIKE ? ESCAPE '\\'"));
            binds.push(SqlValue::Text(escape_like(fragment)));
        }
    }

    let mut sql = String::from(SELECT_POINT);

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    let mut order: Vec<String> = Vec::new();
    let mut sorted_by_id = false;
    if let Some(page) = page {
        for sort in &page.sort {
            sorted_by_id |= sort.column == PointColumn::Id;
            order.push(format!(
                "{ENTITY_ALIAS}.{} {}",
                sort.column.as_str(),
                sort.direction.as_sql()
            ));
        }
    }
    if !sorted_by_id {
        order.push(format!("{ENTITY_ALIAS}.id ASC"));
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(&order.join(", "));

    if let Some(size) = page.and_then(|p| p.size) {
        let offset = page.map_or(0, PageRequest::offset);
        sql.push_str(" LIMIT ? OFFSET ?");
        binds.push(SqlValue::Integer(i64::from(size)));
        binds.push(SqlValue::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));
    }

    SelectQuery { sql, binds }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointbook_core::storage::Sort;

    #[test]
    fn test_select_all_orders_by_id() {
        let query = build_select(None, None);

        assert_eq!(query.sql, format!("{SELECT_POINT} ORDER BY e.id ASC"));
        assert!(query.binds.is_empty());
    }

    #[test]
    fn test_select_by_id_binds_value() {
        let query = build_select(None, Some(&PointCriteria::by_id(42)));

        assert_eq!(
            query.sql,
            format!("{SELECT_POINT} WHERE e.id = ? ORDER BY e.id ASC")
        );
        assert_eq!(query.binds, vec![SqlValue::Integer(42)]);
    }

    #[test]
    fn test_criteria_are_combined_with_and() {
        let criteria = PointCriteria::default()
            .with_title("Harbor")
            .with_description_contains("bay");

        let query = build_select(None, Some(&criteria));

        assert!(query
            .sql
            .contains("WHERE e.title = ? AND e.description LIKE ? ESCAPE '\\'"));
        assert_eq!(
            query.binds,
            vec![
                SqlValue::Text("Harbor".to_string()),
                SqlValue::Text("%bay%".to_string())
            ]
        );
    }

    #[test]
    fn test_hostile_text_is_bound_not_spliced() {
        let criteria = PointCriteria::default().with_title("x' OR '1'='1");

        let query = build_select(None, Some(&criteria));

        assert!(!query.sql.contains("OR '1'='1"));
        assert_eq!(
            query.binds,
            vec![SqlValue::Text("x' OR '1'='1".to_string())]
        );
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_page_adds_limit_offset_and_sort() {
        let page = PageRequest::new(2, 10).with_sort(Sort::desc(PointColumn::Title));

        let query = build_select(Some(&page), None);

        assert!(query
            .sql
            .ends_with("ORDER BY e.title DESC, e.id ASC LIMIT ? OFFSET ?"));
        assert_eq!(
            query.binds,
            vec![SqlValue::Integer(10), SqlValue::Integer(20)]
        );
    }

    #[test]
    fn test_explicit_id_sort_replaces_fallback() {
        let page = PageRequest::unpaged().with_sort(Sort::desc(PointColumn::Id));

        let query = build_select(Some(&page), None);

        assert!(query.sql.ends_with("ORDER BY e.id DESC"));
        assert!(query.binds.is_empty());
    }
}
