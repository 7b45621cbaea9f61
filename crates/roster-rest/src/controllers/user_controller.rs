//! User CRUD and search controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, AppError, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Router,
};
use roster_core::{ApiError, ErrorResponse, FilterParams, UserFilter, UserId};
use roster_service::{CreateUserRequest, DeleteResponse, UpdateUserRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user).put(update_user))
        .route("/user/:id", get(get_user).delete(delete_user))
        .route("/users", get(search_users))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/user",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Create user request: {} {}", request.name, request.surname);

    let response = state.user_service.create_user(request).await?;
    ok(response)
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

/// Overwrite a user. The id travels in the body.
#[utoipa::path(
    put,
    path = "/user",
    tag = "users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", request.id);

    let response = state.user_service.update_user(request).await?;
    ok(response)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = DeleteResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteResponse> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(user_id).await?;
    ok(DeleteResponse::success())
}

/// Search users by gender, status and full name, with optional sorting
/// and paging.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 404, description = "No user matches", body = ErrorResponse)
    )
)]
pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Vec<UserResponse>> {
    debug!("Search users request: {:?}", params);

    let filter = UserFilter::try_from(params)?;
    let response = state.user_service.search_users(filter).await?;
    ok(response)
}

/// Helper to parse user ID from path parameter.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id).map_err(|_| AppError(ApiError::Validation(format!("Invalid user ID: {}", id))))
}
