use thiserror::Error;

/// Client-side errors raised while validating point requests.
///
/// Each variant carries a stable error key that ends up in the problem
/// payload (`errorKey`) and in the `X-<app>-error` header as `error.<key>`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointError {
    #[error("A new point cannot already have an ID")]
    IdExists,
    #[error("Invalid id")]
    IdNull,
    #[error("Invalid ID")]
    IdInvalid,
    #[error("Entity not found")]
    IdNotFound,
    #[error("Point title is required")]
    TitleRequired,
}

impl PointError {
    /// Returns the error key reported to clients.
    pub fn error_key(&self) -> &'static str {
        match self {
            PointError::IdExists => "idexists",
            PointError::IdNull => "idnull",
            PointError::IdInvalid => "idinvalid",
            PointError::IdNotFound => "idnotfound",
            PointError::TitleRequired => "validation",
        }
    }

    /// Returns the offending field for field-level validation errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PointError::TitleRequired => Some("title"),
            _ => None,
        }
    }
}
