//! User entity.

use super::super::value_objects::{Gender, UserStatus};
use crate::UserId;
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A registered user, as held by the store and mirrored into the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,

    pub name: String,

    pub surname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,

    pub gender: Gender,

    pub status: UserStatus,

    #[serde(rename = "b_day", default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,

    /// Join timestamp. Set once at creation and never changed afterwards.
    pub join_date: DateTime<Utc>,
}

impl User {
    /// Returns the name the full-name search matches against:
    /// `name surname[ patronymic]`.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.patronymic {
            Some(patronymic) => format!("{} {} {}", self.name, self.surname, patronymic),
            None => format!("{} {}", self.name, self.surname),
        }
    }
}

/// A user that has not been persisted yet.
///
/// The join date is stamped here; the identifier is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub gender: Gender,
    pub status: UserStatus,
    pub birthday: Option<NaiveDate>,
    pub join_date: DateTime<Utc>,
}

impl NewUser {
    /// Creates a draft stamped with the current time.
    ///
    /// The timestamp is truncated to microseconds, the precision of
    /// `TIMESTAMPTZ`, so the stored and the cached copy compare equal.
    #[must_use]
    pub fn new(
        name: String,
        surname: String,
        patronymic: Option<String>,
        gender: Gender,
        status: UserStatus,
        birthday: Option<NaiveDate>,
    ) -> Self {
        Self {
            name,
            surname,
            patronymic: normalize_optional(patronymic),
            gender,
            status,
            birthday,
            join_date: Utc::now().trunc_subsecs(6),
        }
    }

    /// Builds the persisted entity once the store has assigned an id.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            surname: self.surname,
            patronymic: self.patronymic,
            gender: self.gender,
            status: self.status,
            birthday: self.birthday,
            join_date: self.join_date,
        }
    }
}

/// A full-field update of an existing user.
///
/// The identifier selects the row and is never written; the join date is
/// not part of the update at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub gender: Gender,
    pub status: UserStatus,
    pub birthday: Option<NaiveDate>,
}

impl UserUpdate {
    #[must_use]
    pub fn new(
        id: UserId,
        name: String,
        surname: String,
        patronymic: Option<String>,
        gender: Gender,
        status: UserStatus,
        birthday: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            surname,
            patronymic: normalize_optional(patronymic),
            gender,
            status,
            birthday,
        }
    }

    /// Applies the update on top of an existing record, keeping its join date.
    #[must_use]
    pub fn apply_to(&self, existing: &User) -> User {
        User {
            id: existing.id,
            name: self.name.clone(),
            surname: self.surname.clone(),
            patronymic: self.patronymic.clone(),
            gender: self.gender,
            status: self.status,
            birthday: self.birthday,
            join_date: existing.join_date,
        }
    }
}

/// An empty string is the same as no value.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
