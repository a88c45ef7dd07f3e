//! User record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored user record.
///
/// Records are created in bulk by the seeder and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Seniority label.
    pub role: String,
    /// Department label.
    pub department: String,
    /// Calendar date the user joined.
    pub date_joined: NaiveDate,
}

/// A user record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub date_joined: NaiveDate,
}

impl NewUser {
    /// Attaches a store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            department: self.department,
            date_joined: self.date_joined,
        }
    }
}
