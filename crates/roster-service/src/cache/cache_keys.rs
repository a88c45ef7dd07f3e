//! Cache key generators for consistent key naming.
//!
//! A key is a pure function of every parameter that can change a response.
//! Absent optional values render as empty strings, and free text is escaped
//! so that no two different requests share a key.

use roster_core::UserQuery;

/// Key for the distinct department list.
pub const DEPARTMENTS: &str = "departments";

/// Key for the distinct role list.
pub const ROLES: &str = "roles";

/// Generate the key for one page of the user listing.
///
/// Layout: `users:{skip}:{limit}:{search}:{sort_by}:{sort_order}:{department}:{role}`.
/// Without a sort both sort components are empty.
#[must_use]
pub fn user_list(query: &UserQuery) -> String {
    let (sort_by, sort_order) = query
        .sort
        .map_or(("", ""), |s| (s.field.as_str(), s.order.as_str()));

    format!(
        "users:{}:{}:{}:{}:{}:{}:{}",
        query.page.skip,
        query.page.limit,
        escape(query.search.as_deref()),
        sort_by,
        sort_order,
        escape(query.department.as_deref()),
        escape(query.role.as_deref()),
    )
}

fn escape(value: Option<&str>) -> String {
    value
        .unwrap_or_default()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
}
