//! Structured list requests: filters, sort, and pagination.

use crate::PageRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Columns a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    Email,
    Role,
    Department,
    DateJoined,
}

impl SortField {
    /// Every sortable field, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::Role,
        Self::Department,
        Self::DateJoined,
    ];

    /// Resolves a request parameter to a sort field.
    ///
    /// Names outside the fixed set resolve to `None`; callers treat that as
    /// "leave the store's order alone".
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "role" => Some(Self::Role),
            "department" => Some(Self::Department),
            "date_joined" => Some(Self::DateJoined),
            _ => None,
        }
    }

    /// Returns the wire name, which is also the column name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::Department => "department",
            Self::DateJoined => "date_joined",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// A resolved sort instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    /// Creates a sort instruction.
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// A fully-resolved request for a page of users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UserQuery {
    /// Offset/limit window.
    pub page: PageRequest,
    /// Case-insensitive substring matched against name, email, department and role.
    pub search: Option<String>,
    /// Exact department match.
    pub department: Option<String>,
    /// Exact role match.
    pub role: Option<String>,
    /// Sort instruction; `None` leaves rows in store order.
    pub sort: Option<SortSpec>,
}

impl UserQuery {
    /// Creates a query for the given window with no filters and no sort.
    #[must_use]
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Sets the free-text search. Empty strings count as absent.
    #[must_use]
    pub fn with_search(mut self, search: Option<impl Into<String>>) -> Self {
        self.search = non_empty(search);
        self
    }

    /// Sets the department filter. Empty strings count as absent.
    #[must_use]
    pub fn with_department(mut self, department: Option<impl Into<String>>) -> Self {
        self.department = non_empty(department);
        self
    }

    /// Sets the role filter. Empty strings count as absent.
    #[must_use]
    pub fn with_role(mut self, role: Option<impl Into<String>>) -> Self {
        self.role = non_empty(role);
        self
    }

    /// Sets the sort instruction from a raw field name.
    ///
    /// Unknown names clear the sort instead of failing.
    #[must_use]
    pub fn with_sort_by(mut self, sort_by: &str, order: SortOrder) -> Self {
        self.sort = SortField::parse(sort_by).map(|field| SortSpec::new(field, order));
        self
    }
}

fn non_empty(value: Option<impl Into<String>>) -> Option<String> {
    value.map(Into::into).filter(|s| !s.is_empty())
}
