mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use traits::{PointRepository, POINT_ENTITY};
pub use types::{
    PageRequest, PointColumn, PointCriteria, Sort, SortDirection, DEFAULT_PAGE_SIZE,
};
