//! Search filter for user listings.
//!
//! [`FilterParams`] is the raw query-string form accepted over HTTP;
//! [`UserFilter`] is the checked value object handed to the store. The
//! conversion rejects invalid combinations before any query is built.

use crate::{ApiError, Gender, User, UserStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Attributes a search may be ordered by.
///
/// This is the complete whitelist; the store only ever interpolates
/// [`SortAttribute::column`] into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SortAttribute {
    Id,
    Name,
    Surname,
    Patronymic,
    Gender,
    Status,
    Birthday,
    JoinDate,
}

impl SortAttribute {
    /// Column name in the `users` table.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Patronymic => "patronymic",
            Self::Gender => "gender",
            Self::Status => "status",
            Self::Birthday => "birthday",
            Self::JoinDate => "join_date",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::Id,
            Self::Name,
            Self::Surname,
            Self::Patronymic,
            Self::Gender,
            Self::Status,
            Self::Birthday,
            Self::JoinDate,
        ]
    }

    /// Ascending comparison of two users on this attribute.
    ///
    /// Absent optional values sort after present ones, as `NULL`s do in an
    /// ascending PostgreSQL ordering.
    #[must_use]
    pub fn compare(&self, a: &User, b: &User) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Surname => a.surname.cmp(&b.surname),
            Self::Patronymic => nulls_last(a.patronymic.as_ref(), b.patronymic.as_ref()),
            Self::Gender => a.gender.as_str().cmp(b.gender.as_str()),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
            Self::Birthday => nulls_last(a.birthday.as_ref(), b.birthday.as_ref()),
            Self::JoinDate => a.join_date.cmp(&b.join_date),
        }
    }
}

fn nulls_last<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for SortAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SortAttribute {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|attribute| attribute.column() == s)
            .ok_or_else(|| ApiError::validation(format!("unknown sorting param '{}'", s)))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering of a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub attribute: SortAttribute,
    pub direction: SortDirection,
}

/// A checked user search filter.
///
/// Every field is optional; an empty filter matches every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub gender: Option<Gender>,
    pub status: Option<UserStatus>,
    /// Case-insensitive substring of `name surname[ patronymic]`.
    pub full_name: Option<String>,
    pub sort: Option<Sort>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl UserFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_full_name(mut self, fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        self.full_name = (!fragment.is_empty()).then_some(fragment);
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, attribute: SortAttribute, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            attribute,
            direction,
        });
        self
    }

    /// Sets the limit; zero means no limit.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    /// Sets the offset; zero means no offset.
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = (offset > 0).then_some(offset);
        self
    }

    /// Whether a user satisfies the predicate part of the filter
    /// (ordering and bounds are not considered).
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        if self.gender.is_some_and(|gender| gender != user.gender) {
            return false;
        }
        if self.status.is_some_and(|status| status != user.status) {
            return false;
        }
        match &self.full_name {
            Some(fragment) => user
                .full_name()
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
            None => true,
        }
    }
}

/// Raw search parameters as they arrive in the query string
/// (`/users?Gender=&Status=&FullName=&SortAsk=&SortDesc=&AttributesToSort=&Limit=&Offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "PascalCase")]
pub struct FilterParams {
    pub gender: Option<String>,
    pub status: Option<String>,
    pub full_name: Option<String>,
    pub sort_ask: Option<String>,
    pub sort_desc: Option<String>,
    pub attributes_to_sort: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl TryFrom<FilterParams> for UserFilter {
    type Error = ApiError;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        let mut filter = Self::new();

        if let Some(gender) = non_empty(params.gender.as_deref()) {
            filter = filter.with_gender(gender.parse()?);
        }

        if let Some(status) = non_empty(params.status.as_deref()) {
            filter = filter.with_status(status.parse()?);
        }

        if let Some(full_name) = non_empty(params.full_name.as_deref()) {
            filter = filter.with_full_name(full_name);
        }

        let sort_asc = parse_flag(params.sort_ask.as_deref());
        let sort_desc = parse_flag(params.sort_desc.as_deref());
        if sort_asc && sort_desc {
            return Err(ApiError::validation(
                "you can not sort ascending and descending at the same time",
            ));
        }

        match non_empty(params.attributes_to_sort.as_deref()) {
            Some(attribute) => {
                let direction = if sort_desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                filter = filter.sorted_by(attribute.parse()?, direction);
            }
            None if sort_asc || sort_desc => {
                return Err(ApiError::validation("sorting param is not set"));
            }
            None => {}
        }

        if let Some(limit) = parse_bound("Limit", params.limit.as_deref())? {
            filter = filter.with_limit(limit);
        }

        if let Some(offset) = parse_bound("Offset", params.offset.as_deref())? {
            filter = filter.with_offset(offset);
        }

        Ok(filter)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Lenient boolean: the usual spellings of true, anything else is false.
fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(str::trim),
        Some("1" | "t" | "T" | "true" | "TRUE" | "True")
    )
}

/// Non-numeric bounds are ignored; negative ones are rejected.
fn parse_bound(name: &str, value: Option<&str>) -> Result<Option<u32>, ApiError> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(n) if n < 0 => Err(ApiError::validation(format!(
            "{} must not be negative",
            name
        ))),
        Ok(n) => Ok(Some(u32::try_from(n).unwrap_or(u32::MAX))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserId;
    use chrono::{NaiveDate, Utc};

    fn params() -> FilterParams {
        FilterParams::default()
    }

    fn user(id: i64, name: &str, gender: Gender) -> User {
        User {
            id: UserId(id),
            name: name.to_string(),
            surname: "Petrova".to_string(),
            patronymic: None,
            gender,
            status: UserStatus::Active,
            birthday: None,
            join_date: Utc::now(),
        }
    }

    #[test]
    fn test_empty_params_match_everything() {
        let filter = UserFilter::try_from(params()).unwrap();
        assert_eq!(filter, UserFilter::new());
        assert!(filter.matches(&user(1, "Anna", Gender::Female)));
    }

    #[test]
    fn test_gender_and_status_are_parsed() {
        let filter = UserFilter::try_from(FilterParams {
            gender: Some("female".to_string()),
            status: Some("banned".to_string()),
            ..params()
        })
        .unwrap();
        assert_eq!(filter.gender, Some(Gender::Female));
        assert_eq!(filter.status, Some(UserStatus::Banned));
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        let result = UserFilter::try_from(FilterParams {
            gender: Some("robot".to_string()),
            ..params()
        });
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = UserFilter::try_from(FilterParams {
            status: Some("pending".to_string()),
            ..params()
        });
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_both_directions_are_rejected() {
        let result = UserFilter::try_from(FilterParams {
            sort_ask: Some("true".to_string()),
            sort_desc: Some("true".to_string()),
            attributes_to_sort: Some("name".to_string()),
            ..params()
        });
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_direction_without_attribute_is_rejected() {
        let result = UserFilter::try_from(FilterParams {
            sort_desc: Some("1".to_string()),
            ..params()
        });
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_attribute_outside_whitelist_is_rejected() {
        let result = UserFilter::try_from(FilterParams {
            sort_ask: Some("true".to_string()),
            attributes_to_sort: Some("name; DROP TABLE users".to_string()),
            ..params()
        });
        assert!(matches!(result, Err(ApiError::Validation(_))));

        // Checked even without a direction flag.
        let result = UserFilter::try_from(FilterParams {
            attributes_to_sort: Some("password".to_string()),
            ..params()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_defaults_to_ascending() {
        let filter = UserFilter::try_from(FilterParams {
            attributes_to_sort: Some("join_date".to_string()),
            ..params()
        })
        .unwrap();
        assert_eq!(
            filter.sort,
            Some(Sort {
                attribute: SortAttribute::JoinDate,
                direction: SortDirection::Asc
            })
        );
    }

    #[test]
    fn test_descending_sort() {
        let filter = UserFilter::try_from(FilterParams {
            sort_desc: Some("True".to_string()),
            attributes_to_sort: Some("birthday".to_string()),
            ..params()
        })
        .unwrap();
        let sort = filter.sort.unwrap();
        assert_eq!(sort.attribute, SortAttribute::Birthday);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_unparseable_flags_are_false() {
        let filter = UserFilter::try_from(FilterParams {
            sort_ask: Some("yes".to_string()),
            sort_desc: Some("yes".to_string()),
            ..params()
        })
        .unwrap();
        assert!(filter.sort.is_none());
    }

    #[test]
    fn test_limit_and_offset() {
        let filter = UserFilter::try_from(FilterParams {
            limit: Some("10".to_string()),
            offset: Some("0".to_string()),
            ..params()
        })
        .unwrap();
        assert_eq!(filter.limit, Some(10));
        assert_eq!(filter.offset, None);

        let filter = UserFilter::try_from(FilterParams {
            limit: Some("ten".to_string()),
            ..params()
        })
        .unwrap();
        assert_eq!(filter.limit, None);

        let result = UserFilter::try_from(FilterParams {
            offset: Some("-1".to_string()),
            ..params()
        });
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_full_name_match_is_case_insensitive() {
        let filter = UserFilter::new().with_full_name("anna pet");
        assert!(filter.matches(&user(1, "Anna", Gender::Female)));
        assert!(!filter.matches(&user(2, "Olga", Gender::Female)));
    }

    #[test]
    fn test_gender_filter_matches_subset() {
        let filter = UserFilter::new().with_gender(Gender::Male);
        assert!(filter.matches(&user(1, "Ivan", Gender::Male)));
        assert!(!filter.matches(&user(2, "Anna", Gender::Female)));
    }

    #[test]
    fn test_sort_attribute_whitelist() {
        for attribute in SortAttribute::all() {
            assert_eq!(attribute.column().parse::<SortAttribute>().unwrap(), attribute);
        }
    }

    #[test]
    fn test_compare_puts_missing_values_last() {
        let mut a = user(1, "Anna", Gender::Female);
        let b = user(2, "Olga", Gender::Female);
        a.birthday = NaiveDate::from_ymd_opt(1999, 1, 1);
        assert_eq!(SortAttribute::Birthday.compare(&a, &b), Ordering::Less);
        assert_eq!(SortAttribute::Name.compare(&b, &a), Ordering::Greater);
    }
}
