//! User administration handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authkit_core::domain::{IdentityUser, UserAccount};
use authkit_core::stores::{RoleStore, UserStore};
use authkit_shared::Pagination;
use validator::Validate;

use crate::context::{AppProfile, AppUser};
use crate::handlers::roles::RoleDto;
use crate::response::{bad_request, store_error, ApiResponse, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed: Option<bool>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub email_confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&AppUser> for UserDto {
    fn from(user: &AppUser) -> Self {
        let account = user.account();
        Self {
            id: account.id,
            user_name: account.user_name.clone(),
            email: account.email.clone(),
            email_confirmed: account.email_confirmed,
            phone_number: account.phone_number.clone(),
            display_name: user.profile().display_name.clone(),
            avatar_url: user.profile().avatar_url.clone(),
            created_at: account.created_at,
        }
    }
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ErrorResponse> {
    let pagination = Pagination::new(query.page.unwrap_or(1), query.per_page.unwrap_or(20));
    let users = state
        .ctx
        .users()
        .list(&pagination)
        .await
        .map_err(store_error)?;

    Ok(Json(ApiResponse::success(
        users.iter().map(UserDto::from).collect(),
    )))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserDto>>, ErrorResponse> {
    let user = state
        .ctx
        .users()
        .find_by_id(&id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("NOT_FOUND", "User not found")),
            )
        })?;

    Ok(Json(ApiResponse::success(UserDto::from(&user))))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ErrorResponse> {
    let mut account = UserAccount::new(&payload.user_name, &payload.email)
        .map_err(|e| bad_request(&e.to_string()))?;
    account.phone_number = payload.phone_number;

    let profile = AppProfile {
        display_name: payload.display_name,
        avatar_url: payload.avatar_url,
    };
    let user = AppUser::from_parts(account, profile);

    let created = state.ctx.users().create(&user).await.map_err(store_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(&created))),
    ))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ErrorResponse> {
    let users = state.ctx.users();
    let mut user = users
        .find_by_id(&id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("NOT_FOUND", "User not found")),
            )
        })?;

    {
        let account = user.account_mut();
        if let Some(email) = payload.email {
            account.email = email.trim().to_string();
            account.renormalize();
        }
        if let Some(confirmed) = payload.email_confirmed {
            account.email_confirmed = confirmed;
        }
        if let Some(phone) = payload.phone_number {
            account.phone_number = Some(phone);
        }
        account.touch();
        account.validate().map_err(|e| bad_request(&e.to_string()))?;
    }
    if let Some(display_name) = payload.display_name {
        user.profile.display_name = Some(display_name);
    }
    if let Some(avatar_url) = payload.avatar_url {
        user.profile.avatar_url = Some(avatar_url);
    }

    let updated = users.update(&user).await.map_err(store_error)?;
    Ok(Json(ApiResponse::success(UserDto::from(&updated))))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ErrorResponse> {
    state.ctx.users().delete(&id).await.map_err(store_error)?;
    Ok(Json(ApiResponse::success(())))
}

/// GET /api/v1/users/{id}/roles
pub async fn user_roles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<RoleDto>>>, ErrorResponse> {
    let roles = state
        .ctx
        .roles()
        .roles_for_user(&id)
        .await
        .map_err(store_error)?;

    Ok(Json(ApiResponse::success(
        roles.iter().map(RoleDto::from).collect(),
    )))
}

/// POST /api/v1/users/{id}/roles/{role}
pub async fn add_user_to_role(
    State(state): State<AppState>,
    Path((id, role)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<()>>, ErrorResponse> {
    state
        .ctx
        .roles()
        .add_to_role(&id, &role)
        .await
        .map_err(store_error)?;
    Ok(Json(ApiResponse::success(())))
}

/// DELETE /api/v1/users/{id}/roles/{role}
pub async fn remove_user_from_role(
    State(state): State<AppState>,
    Path((id, role)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<()>>, ErrorResponse> {
    state
        .ctx
        .roles()
        .remove_from_role(&id, &role)
        .await
        .map_err(store_error)?;
    Ok(Json(ApiResponse::success(())))
}
