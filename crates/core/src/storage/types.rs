use std::fmt;
use std::str::FromStr;

use super::RepositoryError;

/// Page size used when a page is requested without an explicit size.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sortable columns of the `point` table.
///
/// Sorting is restricted to this closed set so that caller input never
/// reaches the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointColumn {
    Id,
    Title,
    Description,
}

impl PointColumn {
    /// Returns the column name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            PointColumn::Id => "id",
            PointColumn::Title => "title",
            PointColumn::Description => "description",
        }
    }
}

impl FromStr for PointColumn {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(PointColumn::Id),
            "title" => Ok(PointColumn::Title),
            "description" => Ok(PointColumn::Description),
            other => Err(RepositoryError::InvalidData(format!(
                "Unknown sort property: {other}"
            ))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(RepositoryError::InvalidData(format!(
                "Unknown sort direction: {other}"
            ))),
        }
    }
}

/// A single ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: PointColumn,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(column: PointColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: PointColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }

    /// Parses a `column[,direction]` sort expression such as `id,desc`.
    pub fn parse(expression: &str) -> Result<Self, RepositoryError> {
        let mut parts = expression.splitn(2, ',');
        let column = parts.next().unwrap_or_default().parse()?;
        let direction = match parts.next() {
            Some(direction) => direction.parse()?,
            None => SortDirection::default(),
        };
        Ok(Self { column, direction })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column.as_str(), self.direction.as_sql())
    }
}

/// Offset pagination with optional ordering.
///
/// An unpaged request only carries ordering and returns every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Maximum number of rows per page; `None` for unpaged requests.
    pub size: Option<u32>,
    pub sort: Vec<Sort>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: Some(size),
            sort: Vec::new(),
        }
    }

    /// A request without a limit, used to carry ordering alone.
    pub fn unpaged() -> Self {
        Self::default()
    }

    /// Adds an ordering term. Terms apply in insertion order.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort.push(sort);
        self
    }

    /// Returns the number of rows to skip.
    pub fn offset(&self) -> u64 {
        self.size.map_or(0, |size| u64::from(self.page) * u64::from(size))
    }
}

/// Filter for point queries. All set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointCriteria {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub title_contains: Option<String>,
    pub description_contains: Option<String>,
}

impl PointCriteria {
    /// Criteria matching a single ID.
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_title_contains(mut self, fragment: impl Into<String>) -> Self {
        self.title_contains = Some(fragment.into());
        self
    }

    pub fn with_description_contains(mut self, fragment: impl Into<String>) -> Self {
        self.description_contains = Some(fragment.into());
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title.is_none()
            && self.title_contains.is_none()
            && self.description_contains.is_none()
    }
}
