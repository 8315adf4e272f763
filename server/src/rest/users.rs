use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use platform_api::{ApiJson, ApiPath, ApiQuery, ApiResult};
use products_hr::{
    Page,
    user::{self, NewUser, User, UserPatch},
};

use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list).post(create))
        .route(
            "/users/{id}",
            get(read).put(update).patch(update).delete(remove),
        )
}

async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let created = user::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Page>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(user::list(&state.db, page).await?))
}

async fn read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<User>> {
    Ok(Json(user::get(&state.db, id).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> ApiResult<Json<User>> {
    Ok(Json(user::update(&state.db, id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    user::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
