//! `X-<app>-*` alert headers describing the outcome of a request.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use pointbook_core::point::ENTITY_NAME;

/// Headers for a successful create.
pub fn entity_creation_alert(app_name: &str, id: i64) -> HeaderMap {
    alert(
        app_name,
        "alert",
        &format!("A new {ENTITY_NAME} is created with identifier {id}"),
        &id.to_string(),
    )
}

/// Headers for a successful full or partial update.
pub fn entity_update_alert(app_name: &str, id: i64) -> HeaderMap {
    alert(
        app_name,
        "alert",
        &format!("A {ENTITY_NAME} is updated with identifier {id}"),
        &id.to_string(),
    )
}

/// Headers for a delete, whether or not a row was removed.
pub fn entity_deletion_alert(app_name: &str, id: i64) -> HeaderMap {
    alert(
        app_name,
        "alert",
        &format!("A {ENTITY_NAME} is deleted with identifier {id}"),
        &id.to_string(),
    )
}

/// Headers for a rejected request.
pub fn failure_alert(app_name: &str, error_key: &str) -> HeaderMap {
    alert(app_name, "error", &format!("error.{error_key}"), ENTITY_NAME)
}

fn alert(app_name: &str, kind: &str, message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert_header(&mut headers, format!("X-{app_name}-{kind}"), message);
    insert_header(&mut headers, format!("X-{app_name}-params"), param);
    headers
}

fn insert_header(headers: &mut HeaderMap, name: String, value: &str) {
    match (HeaderName::try_from(name.as_str()), HeaderValue::from_str(value)) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!(header = %name, "Skipping alert header that is not valid HTTP"),
    }
}
