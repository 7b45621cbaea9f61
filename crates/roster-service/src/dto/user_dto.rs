//! User-related DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::validation::rules;
use roster_core::{ApiResult, Gender, NewUser, User, UserId, UserStatus, UserUpdate};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
///
/// Missing text fields deserialize as empty strings so they are reported
/// by validation instead of failing JSON parsing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 2, max = 30), custom(function = "rules::proper_name"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 2, max = 30), custom(function = "rules::proper_name"))]
    pub surname: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 2, max = 30), custom(function = "rules::proper_name"))]
    pub patronymic: Option<String>,

    /// `male` or `female`.
    #[serde(default)]
    #[validate(custom(function = "rules::gender"))]
    pub gender: String,

    /// `active`, `banned` or `deleted`.
    #[serde(default)]
    #[validate(custom(function = "rules::user_status"))]
    pub status: String,

    #[serde(rename = "b_day", default)]
    pub birthday: Option<NaiveDate>,
}

impl CreateUserRequest {
    /// Converts a validated request into a draft stamped with the current time.
    pub fn into_new_user(self) -> ApiResult<NewUser> {
        Ok(NewUser::new(
            self.name,
            self.surname,
            self.patronymic,
            self.gender.parse::<Gender>()?,
            self.status.parse::<UserStatus>()?,
            self.birthday,
        ))
    }
}

/// Request to overwrite an existing user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "must be a positive number"))]
    pub id: i64,

    #[serde(default)]
    #[validate(length(min = 2, max = 30), custom(function = "rules::proper_name"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 2, max = 30), custom(function = "rules::proper_name"))]
    pub surname: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 2, max = 30), custom(function = "rules::proper_name"))]
    pub patronymic: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "rules::gender"))]
    pub gender: String,

    #[serde(default)]
    #[validate(custom(function = "rules::user_status"))]
    pub status: String,

    #[serde(rename = "b_day", default)]
    pub birthday: Option<NaiveDate>,
}

impl UpdateUserRequest {
    /// Converts a validated request into a store update.
    pub fn into_update(self) -> ApiResult<UserUpdate> {
        Ok(UserUpdate::new(
            UserId(self.id),
            self.name,
            self.surname,
            self.patronymic,
            self.gender.parse::<Gender>()?,
            self.status.parse::<UserStatus>()?,
            self.birthday,
        ))
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    pub gender: Gender,
    pub status: UserStatus,
    #[serde(rename = "b_day", default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    pub join_date: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            patronymic: user.patronymic,
            gender: user.gender,
            status: user.status,
            birthday: user.birthday,
            join_date: user.join_date,
        }
    }
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    /// Always `"success"`.
    pub result: String,
}

impl DeleteResponse {
    #[must_use]
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}
