//! In-process user store.

use crate::traits::UserRepository;
use async_trait::async_trait;
use roster_core::{
    ApiError, ApiResult, NewUser, SortDirection, User, UserFilter, UserId, UserUpdate,
};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A [`UserRepository`] over a `BTreeMap`, with the same search semantics
/// as the PostgreSQL store. Identifiers are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<UserId, User>,
    last_id: i64,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with users, keeping their identifiers.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        let repo = Self::new();
        if let Ok(mut state) = repo.state.lock() {
            for user in users {
                state.last_id = state.last_id.max(user.id.into_inner());
                state.users.insert(user.id, user);
            }
        }
        repo
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().map(|state| state.users.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> ApiResult<std::sync::MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| ApiError::internal("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> ApiResult<UserId> {
        let mut state = self.lock()?;
        state.last_id += 1;
        let id = UserId(state.last_id);
        state.users.insert(id, user.clone().into_user(id));
        Ok(id)
    }

    async fn delete(&self, id: UserId) -> ApiResult<bool> {
        Ok(self.lock()?.users.remove(&id).is_some())
    }

    async fn update(&self, update: &UserUpdate) -> ApiResult<Option<User>> {
        let mut state = self.lock()?;
        Ok(state.users.get_mut(&update.id).map(|existing| {
            *existing = update.apply_to(existing);
            existing.clone()
        }))
    }

    async fn find_by_id(&self, id: UserId) -> ApiResult<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn search(&self, filter: &UserFilter) -> ApiResult<Vec<User>> {
        let state = self.lock()?;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect();

        if let Some(sort) = filter.sort {
            users.sort_by(|a, b| match sort.direction {
                SortDirection::Asc => sort.attribute.compare(a, b),
                SortDirection::Desc => sort.attribute.compare(b, a),
            });
        }

        let offset = filter.offset.map_or(0, |n| n as usize);
        let limit = filter.limit.map_or(usize::MAX, |n| n as usize);
        Ok(users.into_iter().skip(offset).take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_core::{Gender, SortAttribute, UserStatus};

    fn new_user(name: &str, surname: &str, gender: Gender) -> NewUser {
        NewUser::new(
            name.to_string(),
            surname.to_string(),
            None,
            gender,
            UserStatus::Active,
            None,
        )
    }

    async fn seeded() -> InMemoryUserRepository {
        let repo = InMemoryUserRepository::new();
        repo.create(&new_user("Olga", "Smirnova", Gender::Female)).await.unwrap();
        repo.create(&new_user("Ivan", "Petrov", Gender::Male)).await.unwrap();
        repo.create(&new_user("Anna", "Ivanova", Gender::Female)).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create(&new_user("Ivan", "Petrov", Gender::Male)).await.unwrap();
        let second = repo.create(&new_user("Anna", "Petrova", Gender::Female)).await.unwrap();
        assert_eq!(first, UserId(1));
        assert_eq!(second, UserId(2));
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let repo = InMemoryUserRepository::new();
        let draft = new_user("Ivan", "Petrov", Gender::Male);
        let id = repo.create(&draft).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found, draft.into_user(id));
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repo = seeded().await;
        assert!(!repo.delete(UserId(99)).await.unwrap());
        assert!(repo.delete(UserId(1)).await.unwrap());
        assert!(repo.find_by_id(UserId(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_leaves_store_unchanged() {
        let repo = seeded().await;
        let update = UserUpdate::new(
            UserId(42),
            "Petr".to_string(),
            "Sidorov".to_string(),
            None,
            Gender::Male,
            UserStatus::Banned,
            None,
        );
        assert!(repo.update(&update).await.unwrap().is_none());
        assert_eq!(repo.len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_join_date() {
        let repo = seeded().await;
        let before = repo.find_by_id(UserId(2)).await.unwrap().unwrap();
        let update = UserUpdate::new(
            UserId(2),
            "Ivan".to_string(),
            "Petrov".to_string(),
            Some("Ilyich".to_string()),
            Gender::Male,
            UserStatus::Banned,
            NaiveDate::from_ymd_opt(1980, 4, 22),
        );

        let after = repo.update(&update).await.unwrap().unwrap();
        assert_eq!(after.status, UserStatus::Banned);
        assert_eq!(after.join_date, before.join_date);
        assert_eq!(repo.find_by_id(UserId(2)).await.unwrap(), Some(after));
    }

    #[tokio::test]
    async fn test_search_filters_sorts_and_bounds() {
        let repo = seeded().await;

        let all = repo.search(&UserFilter::new()).await.unwrap();
        assert_eq!(all.len(), 3);

        let women = repo
            .search(
                &UserFilter::new()
                    .with_gender(Gender::Female)
                    .sorted_by(SortAttribute::Name, SortDirection::Asc),
            )
            .await
            .unwrap();
        let names: Vec<_> = women.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Anna", "Olga"]);

        let page = repo
            .search(
                &UserFilter::new()
                    .sorted_by(SortAttribute::Id, SortDirection::Desc)
                    .with_offset(1)
                    .with_limit(1),
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, UserId(2));
    }

    #[tokio::test]
    async fn test_search_by_full_name() {
        let repo = seeded().await;
        let found = repo
            .search(&UserFilter::new().with_full_name("IVAN PET"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].surname, "Petrov");
    }
}
