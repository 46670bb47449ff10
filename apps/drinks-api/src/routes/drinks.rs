//! Drink catalog CRUD endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::middleware::AuthClaims;
use crate::auth::permissions;
use crate::error::ApiError;
use crate::models::drink::{DrinkChanges, DrinkLong, DrinkShort, Ingredient, NewDrink};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drinks", get(list_drinks).post(create_drink))
        .route("/drinks-detail", get(list_drinks_detail))
        .route("/drinks/{id}", patch(update_drink).delete(delete_drink))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkListResponse {
    pub success: bool,
    pub drinks: Vec<DrinkShort>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkDetailResponse {
    pub success: bool,
    pub drinks: Vec<DrinkLong>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    pub delete: i32,
}

// ---------------------------------------------------------------------------
// GET /drinks
// ---------------------------------------------------------------------------

/// Public short view of the whole catalog. An empty table is reported as
/// 404, matching the service's documented behavior.
#[utoipa::path(
    get,
    path = "/drinks",
    responses(
        (status = 200, description = "Short view of every drink", body = DrinkListResponse),
        (status = 404, description = "The catalog is empty", body = crate::error::ApiErrorBody),
    ),
    tag = "Drinks"
)]
pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinkListResponse>, ApiError> {
    let rows = state.store.list().await?;

    if rows.is_empty() {
        return Err(ApiError::not_found());
    }

    let drinks = rows
        .iter()
        .map(|r| r.short())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DrinkListResponse {
        success: true,
        drinks,
    }))
}

// ---------------------------------------------------------------------------
// GET /drinks-detail
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/drinks-detail",
    responses(
        (status = 200, description = "Long view of every drink", body = DrinkDetailResponse),
        (status = 404, description = "The catalog is empty", body = crate::error::ApiErrorBody),
    ),
    security(("bearer" = [])),
    tag = "Drinks"
)]
pub async fn list_drinks_detail(
    AuthClaims { claims }: AuthClaims,
    State(state): State<AppState>,
) -> Result<Json<DrinkDetailResponse>, ApiError> {
    permissions::check_permission(permissions::GET_DRINKS_DETAIL, &claims)?;

    let rows = state.store.list().await?;

    if rows.is_empty() {
        return Err(ApiError::not_found());
    }

    let drinks = rows
        .iter()
        .map(|r| r.long())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DrinkDetailResponse {
        success: true,
        drinks,
    }))
}

// ---------------------------------------------------------------------------
// POST /drinks
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

#[utoipa::path(
    post,
    path = "/drinks",
    request_body = CreateDrinkRequest,
    responses(
        (status = 200, description = "The created drink, long view", body = DrinkDetailResponse),
        (status = 400, description = "Missing or malformed body", body = crate::error::ApiErrorBody),
        (status = 422, description = "Insert rejected by storage", body = crate::error::ApiErrorBody),
    ),
    security(("bearer" = [])),
    tag = "Drinks"
)]
pub async fn create_drink(
    AuthClaims { claims }: AuthClaims,
    State(state): State<AppState>,
    body: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinkDetailResponse>, ApiError> {
    permissions::check_permission(permissions::POST_DRINKS, &claims)?;

    let Json(body) = body.map_err(|_| ApiError::bad_request())?;

    let title = body.title.trim().to_string();
    if title.is_empty() || body.recipe.is_empty() {
        return Err(ApiError::bad_request());
    }

    let recipe = serde_json::to_string(&body.recipe)?;

    let created = state.store.insert(NewDrink { title, recipe }).await?;

    tracing::info!(id = created.id, title = %created.title, "drink created");

    Ok(Json(DrinkDetailResponse {
        success: true,
        drinks: vec![created.long()?],
    }))
}

// ---------------------------------------------------------------------------
// PATCH /drinks/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    params(("id" = i32, Path, description = "Drink id")),
    request_body = UpdateDrinkRequest,
    responses(
        (status = 200, description = "The updated drink, long view", body = DrinkDetailResponse),
        (status = 404, description = "No drink with that id", body = crate::error::ApiErrorBody),
        (status = 422, description = "Update rejected by storage", body = crate::error::ApiErrorBody),
    ),
    security(("bearer" = [])),
    tag = "Drinks"
)]
pub async fn update_drink(
    AuthClaims { claims }: AuthClaims,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinkDetailResponse>, ApiError> {
    permissions::check_permission(permissions::PATCH_DRINKS, &claims)?;

    // A non-integer id would not have matched the source's typed route.
    let Path(id) = path.map_err(|_| ApiError::not_found())?;
    let Json(body) = body.map_err(|_| ApiError::bad_request())?;

    state
        .store
        .find(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    let title = match body.title {
        Some(t) => {
            let t = t.trim().to_string();
            if t.is_empty() {
                return Err(ApiError::bad_request());
            }
            Some(t)
        }
        None => None,
    };

    let recipe = match body.recipe {
        Some(r) => {
            if r.is_empty() {
                return Err(ApiError::bad_request());
            }
            Some(serde_json::to_string(&r)?)
        }
        None => None,
    };

    let updated = state
        .store
        .update(id, DrinkChanges { title, recipe })
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(DrinkDetailResponse {
        success: true,
        drinks: vec![updated.long()?],
    }))
}

// ---------------------------------------------------------------------------
// DELETE /drinks/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    params(("id" = i32, Path, description = "Drink id")),
    responses(
        (status = 200, description = "Id of the deleted drink", body = DeleteDrinkResponse),
        (status = 404, description = "No drink with that id", body = crate::error::ApiErrorBody),
    ),
    security(("bearer" = [])),
    tag = "Drinks"
)]
pub async fn delete_drink(
    AuthClaims { claims }: AuthClaims,
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeleteDrinkResponse>, ApiError> {
    permissions::check_permission(permissions::DELETE_DRINKS, &claims)?;

    let Path(id) = path.map_err(|_| ApiError::not_found())?;

    state
        .store
        .find(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    if !state.store.delete(id).await? {
        return Err(ApiError::not_found());
    }

    tracing::info!(id, "drink deleted");

    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: id,
    }))
}
