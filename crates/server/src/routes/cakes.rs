use axum::{extract::{Path, State}, http::StatusCode, Json};
use service::cake::domain::{CakeResponse, CakesResponse, CreateCakeRequest, UpdateCakeRequest};

use crate::{errors::ApiError, metrics, state::ServerState};

#[utoipa::path(
    get, path = "/cakes", tag = "cakes",
    responses(
        (status = 200, description = "All cakes sorted by title", body = crate::openapi::CakesResponseDoc)
    )
)]
pub async fn list_cakes(State(state): State<ServerState>) -> Result<Json<CakesResponse>, ApiError> {
    let res = state.cakes.list().await;
    metrics::observe("list", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    get, path = "/cakes/{id}", tag = "cakes",
    params(("id" = i64, Path, description = "Cake ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CakeResponseDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_cake(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<CakeResponse>, ApiError> {
    let res = state.cakes.get_by_id(id).await;
    metrics::observe("get", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    post, path = "/cakes", tag = "cakes",
    request_body = crate::openapi::CakeRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CakeResponseDoc)
    )
)]
pub async fn create_cake(
    State(state): State<ServerState>,
    Json(input): Json<CreateCakeRequest>,
) -> Result<(StatusCode, Json<CakeResponse>), ApiError> {
    let res = state.cakes.create(input).await;
    metrics::observe("create", &res);
    Ok((StatusCode::CREATED, Json(res?)))
}

#[utoipa::path(
    put, path = "/cakes/{id}", tag = "cakes",
    params(("id" = i64, Path, description = "Cake ID")),
    request_body = crate::openapi::CakeRequestDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_cake(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateCakeRequest>,
) -> Result<StatusCode, ApiError> {
    let res = state.cakes.update(id, input).await;
    metrics::observe("update", &res);
    res?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/cakes/{id}", tag = "cakes",
    params(("id" = i64, Path, description = "Cake ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_cake(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    let res = state.cakes.delete(id).await;
    metrics::observe("delete", &res);
    res?;
    Ok(StatusCode::NO_CONTENT)
}
