//! User-related DTOs.

use roster_core::validation::rules;
use roster_core::{Page, PageRequest, SortOrder, User, UserQuery};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

fn default_limit() -> u64 {
    PageRequest::DEFAULT_LIMIT
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_sort_order() -> String {
    "asc".to_string()
}

fn default_seed_count() -> usize {
    100
}

/// Query parameters of the user listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListUsersRequest {
    /// Number of matching users to skip.
    #[serde(default)]
    pub skip: u64,

    /// Page size.
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: u64,

    /// Case-insensitive substring matched against name, email, department and role.
    pub search: Option<String>,

    /// Sort column. Unknown columns are ignored.
    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    /// `asc` or `desc`.
    #[serde(default = "default_sort_order")]
    #[validate(custom(function = "rules::sort_order"))]
    pub sort_order: String,

    /// Exact department match.
    pub department: Option<String>,

    /// Exact role match.
    pub role: Option<String>,
}

impl Default for ListUsersRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            search: None,
            sort_by: default_sort_by(),
            sort_order: default_sort_order(),
            department: None,
            role: None,
        }
    }
}

impl ListUsersRequest {
    /// Converts validated parameters into a store query.
    #[must_use]
    pub fn into_query(self) -> UserQuery {
        let order = self.sort_order.parse::<SortOrder>().unwrap_or_default();
        UserQuery::new(PageRequest::new(self.skip, self.limit))
            .with_search(self.search)
            .with_department(self.department)
            .with_role(self.role)
            .with_sort_by(&self.sort_by, order)
    }
}

/// Query parameters of the seed operation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SeedRequest {
    /// Number of users to generate.
    #[serde(default = "default_seed_count")]
    #[validate(range(min = 1, max = 1000, message = "Count must be between 1 and 1000"))]
    pub count: usize,
}

impl Default for SeedRequest {
    fn default() -> Self {
        Self {
            count: default_seed_count(),
        }
    }
}

/// One page of the user listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl From<Page<User>> for UserListResponse {
    fn from(page: Page<User>) -> Self {
        Self {
            users: page.users,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a message body.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Acknowledgement for a completed seed.
    #[must_use]
    pub fn seeded(count: u64) -> Self {
        Self::new(format!("Seeded {} users", count))
    }

    /// Acknowledgement for a cache clear.
    #[must_use]
    pub fn cache_cleared() -> Self {
        Self::new("Cache cleared")
    }
}
