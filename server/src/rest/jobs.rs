use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use platform_api::{ApiJson, ApiPath, ApiQuery, ApiResult};
use products_hr::{
    Page,
    department::Department,
    job::{self, Job, JobPatch, NewJob},
};

use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list).post(create))
        .route(
            "/jobs/{id}",
            get(read).put(update).patch(update).delete(remove),
        )
        .route("/jobs/{id}/department", get(department))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewJob>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    let created = job::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Page>,
) -> ApiResult<Json<Vec<Job>>> {
    Ok(Json(job::list(&state.db, page).await?))
}

async fn read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Job>> {
    Ok(Json(job::get(&state.db, id).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<JobPatch>,
) -> ApiResult<Json<Job>> {
    Ok(Json(job::update(&state.db, id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    job::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn department(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Department>> {
    Ok(Json(job::department(&state.db, id).await?))
}
