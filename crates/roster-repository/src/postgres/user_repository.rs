//! PostgreSQL user repository implementation.

use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{ApiError, ApiResult, NewUser, User, UserFilter, UserId, UserUpdate};
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::{debug, info};

const USER_COLUMNS: &str = "id, name, surname, patronymic, gender, status, birthday, join_date";

/// Concatenated full name matched by the `FullName` search filter.
const FULL_NAME_EXPR: &str = "(name || ' ' || surname || COALESCE(' ' || patronymic, ''))";

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<DatabasePool>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    surname: String,
    patronymic: Option<String>,
    gender: String,
    status: String,
    birthday: Option<NaiveDate>,
    join_date: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = ApiError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let gender = row
            .gender
            .parse()
            .map_err(|_| ApiError::internal(format!("Invalid gender in database: {}", row.gender)))?;
        let status = row
            .status
            .parse()
            .map_err(|_| ApiError::internal(format!("Invalid status in database: {}", row.status)))?;

        Ok(User {
            id: UserId(row.id),
            name: row.name,
            surname: row.surname,
            patronymic: row.patronymic,
            gender,
            status,
            birthday: row.birthday,
            join_date: row.join_date,
        })
    }
}

/// Escapes `LIKE` metacharacters so the fragment matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds the search query. Only whitelisted column names are ever
/// interpolated; every value is bound.
fn build_search(filter: &UserFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {} FROM users WHERE TRUE", USER_COLUMNS));

    if let Some(gender) = filter.gender {
        query.push(" AND gender = ").push_bind(gender.as_str());
    }

    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }

    if let Some(full_name) = &filter.full_name {
        query
            .push(" AND ")
            .push(FULL_NAME_EXPR)
            .push(" ILIKE ")
            .push_bind(format!("%{}%", escape_like(full_name)));
    }

    if let Some(sort) = filter.sort {
        query
            .push(" ORDER BY ")
            .push(sort.attribute.column())
            .push(" ")
            .push(sort.direction.as_sql());
    }

    if let Some(limit) = filter.limit {
        query.push(" LIMIT ").push_bind(i64::from(limit));
    }

    if let Some(offset) = filter.offset {
        query.push(" OFFSET ").push_bind(i64::from(offset));
    }

    query
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> ApiResult<UserId> {
        debug!("Creating user: {} {}", user.name, user.surname);

        // Absent optional fields are left out of the column list.
        let mut query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO users (name, surname, gender, status, join_date");
        if user.patronymic.is_some() {
            query.push(", patronymic");
        }
        if user.birthday.is_some() {
            query.push(", birthday");
        }

        query.push(") VALUES (");
        {
            let mut values = query.separated(", ");
            values.push_bind(&user.name);
            values.push_bind(&user.surname);
            values.push_bind(user.gender.as_str());
            values.push_bind(user.status.as_str());
            values.push_bind(user.join_date);
            if let Some(patronymic) = &user.patronymic {
                values.push_bind(patronymic);
            }
            if let Some(birthday) = user.birthday {
                values.push_bind(birthday);
            }
        }
        query.push(") RETURNING id");

        let id: i64 = query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.inner())
            .await
            .map_err(|e| ApiError::from(e).with_context("insert user"))?;

        info!("User created: {}", id);
        Ok(UserId(id))
    }

    async fn delete(&self, id: UserId) -> ApiResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await
            .map_err(|e| ApiError::from(e).with_context("delete user"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update(&self, update: &UserUpdate) -> ApiResult<Option<User>> {
        debug!("Updating user: {}", update.id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = $1, surname = $2, patronymic = $3, gender = $4,
                status = $5, birthday = $6
            WHERE id = $7
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&update.name)
        .bind(&update.surname)
        .bind(update.patronymic.as_deref())
        .bind(update.gender.as_str())
        .bind(update.status.as_str())
        .bind(update.birthday)
        .bind(update.id.into_inner())
        .fetch_optional(self.pool.inner())
        .await
        .map_err(|e| ApiError::from(e).with_context("update user"))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> ApiResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await
        .map_err(|e| ApiError::from(e).with_context("find user"))?;

        row.map(User::try_from).transpose()
    }

    async fn search(&self, filter: &UserFilter) -> ApiResult<Vec<User>> {
        debug!("Searching users: {:?}", filter);

        let rows: Vec<UserRow> = build_search(filter)
            .build_query_as::<UserRow>()
            .fetch_all(self.pool.inner())
            .await
            .map_err(|e| ApiError::from(e).with_context("search users"))?;

        rows.into_iter().map(User::try_from).collect()
    }
}
