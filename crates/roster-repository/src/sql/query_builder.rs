//! SQL rendering for user list requests.
//!
//! Every helper appends to a caller-owned [`QueryBuilder`], binding values
//! instead of splicing them into the SQL text. Column names only ever come
//! from the static mapping in [`sort_column`].

use chrono::NaiveDate;
use roster_core::{NewUser, PageRequest, SortField, SortOrder, SortSpec, UserQuery};
use sqlx::{Database, Encode, QueryBuilder, Type};

/// Columns selected for a [`User`](roster_core::User) row.
pub const USER_COLUMNS: &str = "id, name, email, role, department, date_joined";

/// Columns a free-text search is matched against.
const SEARCH_COLUMNS: [&str; 4] = ["name", "email", "department", "role"];

/// Maps a sort field to its column.
#[must_use]
pub const fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Id => "id",
        SortField::Name => "name",
        SortField::Email => "email",
        SortField::Role => "role",
        SortField::Department => "department",
        SortField::DateJoined => "date_joined",
    }
}

/// Escapes `LIKE` wildcards so the needle matches literally under
/// `ESCAPE '\'`.
#[must_use]
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends the `WHERE` clause for the query's search and exact filters.
///
/// Both sides of the search comparison are folded by the store's `LOWER`,
/// so a needle always matches the spelling it was stored with.
pub fn push_filters<'args, DB>(qb: &mut QueryBuilder<'args, DB>, query: &UserQuery)
where
    DB: Database,
    String: Encode<'args, DB> + Type<DB>,
{
    let mut keyword = " WHERE ";

    if let Some(search) = &query.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(keyword).push("(");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push("LOWER(")
                .push(*column)
                .push(") LIKE LOWER(")
                .push_bind(pattern.clone())
                .push(") ESCAPE '\\'");
        }
        qb.push(")");
        keyword = " AND ";
    }

    if let Some(department) = &query.department {
        qb.push(keyword).push("department = ").push_bind(department.clone());
        keyword = " AND ";
    }

    if let Some(role) = &query.role {
        qb.push(keyword).push("role = ").push_bind(role.clone());
    }
}

/// Appends `ORDER BY` for a known sort, with `id` as tie-breaker.
///
/// Without a sort nothing is appended and rows come back in store order.
pub fn push_order<DB: Database>(qb: &mut QueryBuilder<'_, DB>, sort: Option<SortSpec>) {
    let Some(sort) = sort else {
        return;
    };

    let direction = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    qb.push(" ORDER BY ")
        .push(sort_column(sort.field))
        .push(" ")
        .push(direction);

    if sort.field != SortField::Id {
        qb.push(", id ASC");
    }
}

/// Appends `LIMIT`/`OFFSET` for the page window.
pub fn push_window<'args, DB>(qb: &mut QueryBuilder<'args, DB>, page: PageRequest)
where
    DB: Database,
    i64: Encode<'args, DB> + Type<DB>,
{
    qb.push(" LIMIT ")
        .push_bind(i64::try_from(page.limit).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(page.skip).unwrap_or(i64::MAX));
}

/// Appends a multi-row `VALUES` list for `users`.
pub fn push_user_values<'args, DB>(qb: &mut QueryBuilder<'args, DB>, users: &[NewUser])
where
    DB: Database,
    String: Encode<'args, DB> + Type<DB>,
    NaiveDate: Encode<'args, DB> + Type<DB>,
{
    qb.push_values(users, |mut row, user| {
        row.push_bind(user.name.clone())
            .push_bind(user.email.clone())
            .push_bind(user.role.clone())
            .push_bind(user.department.clone())
            .push_bind(user.date_joined);
    });
}
