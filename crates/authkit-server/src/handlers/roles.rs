//! Role administration handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authkit_core::domain::Role;
use authkit_core::stores::RoleStore;

use crate::response::{bad_request, store_error, ApiResponse, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoleDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Role> for RoleDto {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            description: role.description.clone(),
        }
    }
}

/// GET /api/v1/roles
pub async fn list_roles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RoleDto>>>, ErrorResponse> {
    let roles = state.ctx.roles().list().await.map_err(store_error)?;
    Ok(Json(ApiResponse::success(
        roles.iter().map(RoleDto::from).collect(),
    )))
}

/// POST /api/v1/roles
pub async fn create_role(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoleDto>>), ErrorResponse> {
    let role = Role::new(&payload.name, payload.description)
        .map_err(|e| bad_request(&e.to_string()))?;

    let created = state.ctx.roles().create(&role).await.map_err(store_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RoleDto::from(&created))),
    ))
}

/// DELETE /api/v1/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ErrorResponse> {
    state.ctx.roles().delete(&id).await.map_err(store_error)?;
    Ok(Json(ApiResponse::success(())))
}
